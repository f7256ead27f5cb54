//! Driven port for the generative model that analyses symptoms.
//!
//! Adapters own prompting and response cleaning; the domain only sees a
//! parsed [`SymptomAnalysis`].

use async_trait::async_trait;

use crate::domain::{SymptomAnalysis, SymptomImage, SymptomText};

use super::define_port_error;

define_port_error! {
    /// Errors raised while calling the model.
    pub enum SymptomAnalyzerError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "model transport failed: {message}",
        /// Model call exceeded the configured timeout.
        Timeout { message: String } => "model call timed out: {message}",
        /// The model API rejected the request.
        Rejected { status: u16, message: String } =>
            "model rejected request with status {status}: {message}",
        /// The model answered without usable text.
        EmptyResponse { message: String } => "model returned no content: {message}",
        /// The model's text was not the expected JSON shape.
        Decode { message: String } => "model response decode failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    /// Analyse a text-only symptom description.
    async fn analyze_text(
        &self,
        symptoms: &SymptomText,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError>;

    /// Analyse a description together with a photo.
    async fn analyze_image(
        &self,
        symptoms: &SymptomText,
        image: &SymptomImage,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError>;
}
