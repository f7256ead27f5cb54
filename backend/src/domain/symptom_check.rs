//! Symptom check use-cases: analyse, enrich with nearby hospitals, record.
//!
//! Only the model call and the image upload can fail a request. Hospital
//! lookups degrade to an inline error and history writes are best effort.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{
    HistoryQuery, HospitalLocator, HospitalLocatorError, ImageCheckRequest, QueryHistoryRepository,
    SymptomAnalyzer, SymptomAnalyzerError, SymptomCheckCommand, SymptomImageStore,
    TextCheckRequest,
};
use super::{
    Coordinates, Error, HistoryEntry, HospitalLookup, NewHistoryEntry, SymptomAnalysis,
    SymptomText, User,
};

/// Message returned when the photo cannot be stored.
pub const IMAGE_UPLOAD_FAILED_MESSAGE: &str = "Failed to upload image.";

/// Driven ports used by [`SymptomCheckService`].
#[derive(Clone)]
pub struct SymptomCheckPorts {
    pub analyzer: Arc<dyn SymptomAnalyzer>,
    pub hospitals: Arc<dyn HospitalLocator>,
    pub images: Arc<dyn SymptomImageStore>,
    pub history: Arc<dyn QueryHistoryRepository>,
}

/// Symptom check service implementing [`SymptomCheckCommand`] and
/// [`HistoryQuery`].
#[derive(Clone)]
pub struct SymptomCheckService {
    ports: SymptomCheckPorts,
}

impl SymptomCheckService {
    pub fn new(ports: SymptomCheckPorts) -> Self {
        Self { ports }
    }

    async fn enrich(
        &self,
        analysis: SymptomAnalysis,
        location: Option<Coordinates>,
    ) -> SymptomAnalysis {
        let Some(near) = location else {
            return analysis;
        };
        let lookup = match self.ports.hospitals.nearby(near).await {
            Ok(found) => HospitalLookup::Found(found),
            Err(err) => {
                warn!(error = %err, "hospital lookup failed");
                HospitalLookup::failed(lookup_failure_message(&err))
            }
        };
        analysis.with_hospitals(lookup)
    }

    async fn record(
        &self,
        user: &User,
        symptoms: SymptomText,
        analysis: &SymptomAnalysis,
        image_url: Option<String>,
    ) {
        let entry = NewHistoryEntry::new(user.id, symptoms, analysis, image_url);
        if let Err(err) = self.ports.history.record(&entry).await {
            warn!(user_id = %user.id, error = %err, "failed to record query history");
        }
    }
}

fn analyzer_error(err: &SymptomAnalyzerError) -> Error {
    warn!(error = %err, "symptom analysis failed");
    Error::upstream(format!("Failed to get analysis from the model: {err}"))
}

/// Inline message embedded in place of the hospital list.
pub fn lookup_failure_message(err: &HospitalLocatorError) -> String {
    match err {
        HospitalLocatorError::Rejected { status, message } => {
            format!("Error from location service: {status} - {message}")
        }
        HospitalLocatorError::Transport { .. } | HospitalLocatorError::Timeout { .. } => {
            "Failed to connect to the location service.".to_owned()
        }
        HospitalLocatorError::Decode { message } => {
            format!("An unexpected error occurred: {message}")
        }
    }
}

#[async_trait]
impl SymptomCheckCommand for SymptomCheckService {
    async fn check_text(
        &self,
        user: &User,
        request: TextCheckRequest,
    ) -> Result<SymptomAnalysis, Error> {
        let TextCheckRequest { symptoms, location } = request;
        let analysis = self
            .ports
            .analyzer
            .analyze_text(&symptoms)
            .await
            .map_err(|err| analyzer_error(&err))?;
        let analysis = self.enrich(analysis, location).await;
        self.record(user, symptoms, &analysis, None).await;
        info!(user_id = %user.id, "text symptom check completed");
        Ok(analysis)
    }

    async fn check_image(
        &self,
        user: &User,
        request: ImageCheckRequest,
    ) -> Result<SymptomAnalysis, Error> {
        let ImageCheckRequest {
            symptoms,
            image,
            location,
        } = request;
        let image_url = self
            .ports
            .images
            .upload(user.id, &image)
            .await
            .map_err(|err| {
                warn!(user_id = %user.id, error = %err, "image upload failed");
                Error::storage_failure(IMAGE_UPLOAD_FAILED_MESSAGE)
            })?;
        let analysis = self
            .ports
            .analyzer
            .analyze_image(&symptoms, &image)
            .await
            .map_err(|err| analyzer_error(&err))?;
        let analysis = self.enrich(analysis, location).await;
        self.record(user, symptoms, &analysis, Some(image_url)).await;
        info!(user_id = %user.id, "image symptom check completed");
        Ok(analysis)
    }
}

#[async_trait]
impl HistoryQuery for SymptomCheckService {
    async fn history(&self, user: &User) -> Result<Vec<HistoryEntry>, Error> {
        match self.ports.history.list_for_user(user.id).await {
            Ok(rows) => Ok(rows),
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "history lookup failed");
                Ok(Vec::new())
            }
        }
    }
}
