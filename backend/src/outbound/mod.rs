//! Outbound adapters implementing domain ports for external services.
//!
//! - **gemini**: generative-model symptom analysis
//! - **geoapify**: nearby hospital search
//! - **supabase**: user and history tables plus photo storage
//!
//! Adapters are thin translators between domain types and vendor payloads.
//! They contain no business logic and report failures as port errors.

pub mod gemini;
pub mod geoapify;
mod http_support;
pub mod supabase;

pub use http_support::AdapterBuildError;
