//! Driven port for nearby hospital search.

use async_trait::async_trait;

use crate::domain::{Coordinates, Hospital};

use super::define_port_error;

define_port_error! {
    /// Errors raised by places-search adapters.
    pub enum HospitalLocatorError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "places transport failed: {message}",
        /// Search exceeded the configured timeout.
        Timeout { message: String } => "places search timed out: {message}",
        /// The places API rejected the request.
        Rejected { status: u16, message: String } =>
            "places search rejected with status {status}: {message}",
        /// Response body could not be decoded.
        Decode { message: String } => "places response decode failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalLocator: Send + Sync {
    /// Return hospitals and clinics around `near`, closest first.
    async fn nearby(&self, near: Coordinates) -> Result<Vec<Hospital>, HospitalLocatorError>;
}

/// Fixture locator that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureHospitalLocator;

#[async_trait]
impl HospitalLocator for FixtureHospitalLocator {
    async fn nearby(&self, _near: Coordinates) -> Result<Vec<Hospital>, HospitalLocatorError> {
        Ok(Vec::new())
    }
}
