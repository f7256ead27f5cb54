//! Runtime configuration.
//!
//! Vendor credentials and token settings come from the process environment
//! through [`mockable::Env`] so they can be exercised with `MockEnv`. Server
//! settings (bind address, CORS origins, outbound timeouts) are layered by
//! OrthoConfig from CLI flags, `SYMPTOM_CHECKER_*` variables and config files.

mod server;
mod vendor;

pub use server::{
    DEFAULT_BIND_ADDR, DEFAULT_CORS_ORIGINS, OutboundTimeouts, ServerSettings,
};
pub use vendor::{VendorSettings, vendor_settings_from_env};

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// A server setting could not be parsed.
    #[error("invalid server setting {name}='{value}': {message}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        message: String,
    },
}
