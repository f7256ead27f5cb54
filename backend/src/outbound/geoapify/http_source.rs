//! Reqwest-backed Geoapify hospital locator.
//!
//! This adapter owns transport details only: query construction, the one-off
//! category fallback, HTTP error mapping and decoding into domain hospitals.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::info;

use super::dto::PlacesResponseDto;
use crate::domain::ports::{HospitalLocator, HospitalLocatorError};
use crate::domain::{Coordinates, Hospital};
use crate::outbound::http_support::{AdapterBuildError, body_preview, build_client, join_endpoint};

/// Public Geoapify API root.
pub const DEFAULT_GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com";

const PREFERRED_CATEGORIES: &str = "healthcare.hospital,healthcare.clinic_or_praxis";
const FALLBACK_CATEGORIES: &str = "healthcare.hospital,healthcare";
const FALLBACK_TRIGGER: &str = "Invalid parameters";

/// Search shape sent with every lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoapifySearch {
    /// Search radius around the caller in metres.
    pub radius_metres: u32,
    /// Maximum number of places returned.
    pub limit: u32,
}

impl Default for GeoapifySearch {
    fn default() -> Self {
        Self {
            radius_metres: 5000,
            limit: 7,
        }
    }
}

/// Failed search, flagged when the full error body asks for the fallback
/// categories.
struct SearchFailure {
    error: HospitalLocatorError,
    retry_with_fallback: bool,
}

impl From<HospitalLocatorError> for SearchFailure {
    fn from(error: HospitalLocatorError) -> Self {
        Self {
            error,
            retry_with_fallback: false,
        }
    }
}

/// Hospital locator backed by the Geoapify Places API.
pub struct GeoapifyHospitalLocator {
    client: Client,
    endpoint: Url,
    api_key: String,
    search: GeoapifySearch,
}

impl GeoapifyHospitalLocator {
    /// Build a locator against `base_url` (normally [`DEFAULT_GEOAPIFY_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or the endpoint URL
    /// is invalid.
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
        search: GeoapifySearch,
    ) -> Result<Self, AdapterBuildError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: join_endpoint(base_url, "v2/places")?,
            api_key: api_key.into(),
            search,
        })
    }

    async fn search(
        &self,
        near: Coordinates,
        categories: &str,
    ) -> Result<Vec<Hospital>, SearchFailure> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&query_params(near, categories, self.search, &self.api_key))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(SearchFailure {
                retry_with_fallback: should_fall_back(status, body.as_ref()),
                error: map_status_error(status, body.as_ref()),
            });
        }
        parse_hospitals(body.as_ref()).map_err(SearchFailure::from)
    }
}

#[async_trait]
impl HospitalLocator for GeoapifyHospitalLocator {
    async fn nearby(&self, near: Coordinates) -> Result<Vec<Hospital>, HospitalLocatorError> {
        match self.search(near, PREFERRED_CATEGORIES).await {
            Ok(found) => Ok(found),
            Err(failure) if failure.retry_with_fallback => {
                info!(error = %failure.error, "retrying places search with fallback categories");
                self.search(near, FALLBACK_CATEGORIES)
                    .await
                    .map_err(|retry| retry.error)
            }
            Err(failure) => Err(failure.error),
        }
    }
}

fn query_params(
    near: Coordinates,
    categories: &str,
    search: GeoapifySearch,
    api_key: &str,
) -> [(&'static str, String); 5] {
    let (lon, lat) = (near.longitude(), near.latitude());
    [
        ("categories", categories.to_owned()),
        ("filter", format!("circle:{lon},{lat},{}", search.radius_metres)),
        ("bias", format!("proximity:{lon},{lat}")),
        ("limit", search.limit.to_string()),
        ("apiKey", api_key.to_owned()),
    ]
}

/// Checked against the whole body; the error message only keeps a preview.
fn should_fall_back(status: StatusCode, body: &[u8]) -> bool {
    status == StatusCode::BAD_REQUEST && String::from_utf8_lossy(body).contains(FALLBACK_TRIGGER)
}

fn parse_hospitals(body: &[u8]) -> Result<Vec<Hospital>, HospitalLocatorError> {
    let decoded: PlacesResponseDto = serde_json::from_slice(body).map_err(|error| {
        HospitalLocatorError::decode(format!("invalid Geoapify JSON payload: {error}"))
    })?;
    Ok(decoded.into_hospitals())
}

fn map_transport_error(error: reqwest::Error) -> HospitalLocatorError {
    if error.is_timeout() {
        HospitalLocatorError::timeout(error.to_string())
    } else {
        HospitalLocatorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> HospitalLocatorError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            HospitalLocatorError::timeout(format!("status {}", status.as_u16()))
        }
        _ => HospitalLocatorError::rejected(status.as_u16(), body_preview(body)),
    }
}
