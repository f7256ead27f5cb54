//! Symptom checker backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, use-case services and ports;
//! [`inbound`] exposes them over HTTP; [`outbound`] implements the driven
//! ports against Gemini, Geoapify and Supabase.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
