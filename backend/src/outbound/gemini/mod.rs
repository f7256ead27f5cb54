//! Gemini outbound adapter.
//!
//! Implements the `SymptomAnalyzer` port on top of the `generateContent` REST
//! endpoint.

mod dto;
mod http_source;
mod prompt;

pub use http_source::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiSymptomAnalyzer};
