//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use symptom_checker::config::{OutboundTimeouts, VendorSettings};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) vendors: VendorSettings,
    pub(crate) timeouts: OutboundTimeouts,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from vendor credentials and timeouts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, vendors: VendorSettings, timeouts: OutboundTimeouts) -> Self {
        Self {
            bind_addr,
            cors_origins: Vec::new(),
            vendors,
            timeouts,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Restrict browser access to `origins`.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
