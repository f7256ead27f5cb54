//! Driving port for symptom analysis requests.

use async_trait::async_trait;

use crate::domain::{Coordinates, Error, SymptomAnalysis, SymptomImage, SymptomText, User};

/// Text-only analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCheckRequest {
    pub symptoms: SymptomText,
    pub location: Option<Coordinates>,
}

/// Photo analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCheckRequest {
    pub symptoms: SymptomText,
    pub image: SymptomImage,
    pub location: Option<Coordinates>,
}

/// Domain use-case port for running and recording symptom checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymptomCheckCommand: Send + Sync {
    /// Analyse text symptoms for `user`, enrich and record the result.
    async fn check_text(
        &self,
        user: &User,
        request: TextCheckRequest,
    ) -> Result<SymptomAnalysis, Error>;

    /// Upload the photo, analyse it with the text, enrich and record.
    async fn check_image(
        &self,
        user: &User,
        request: ImageCheckRequest,
    ) -> Result<SymptomAnalysis, Error>;
}
