//! HTTP server settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::ConfigError;

/// Address the server binds when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Origins allowed by the CORS layer when none are configured.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost", "http://localhost:8080"];

const DEFAULT_PLACES_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Listener, CORS and outbound timeout settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SYMPTOM_CHECKER")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// Comma-separated list of allowed browser origins.
    pub cors_origins: Option<String>,
    /// Timeout for Geoapify requests in seconds.
    pub places_timeout_secs: Option<u64>,
    /// Timeout for Gemini requests in seconds.
    pub model_timeout_secs: Option<u64>,
    /// Timeout for Supabase requests in seconds.
    pub store_timeout_secs: Option<u64>,
}

/// Per-collaborator request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundTimeouts {
    pub places: Duration,
    pub model: Duration,
    pub store: Duration,
}

impl ServerSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| ConfigError::InvalidSetting {
            name: "bind_addr",
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Allowed CORS origins, blank entries dropped.
    pub fn cors_origins(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if configured.is_empty() {
            DEFAULT_CORS_ORIGINS.iter().map(|&origin| origin.to_owned()).collect()
        } else {
            configured
        }
    }

    /// Timeouts for the three hosted collaborators.
    pub fn timeouts(&self) -> OutboundTimeouts {
        let secs = |value: Option<u64>, default: u64| {
            Duration::from_secs(value.filter(|&secs| secs > 0).unwrap_or(default))
        };
        OutboundTimeouts {
            places: secs(self.places_timeout_secs, DEFAULT_PLACES_TIMEOUT_SECS),
            model: secs(self.model_timeout_secs, DEFAULT_MODEL_TIMEOUT_SECS),
            store: secs(self.store_timeout_secs, DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "SYMPTOM_CHECKER_BIND_ADDR",
        "SYMPTOM_CHECKER_CORS_ORIGINS",
        "SYMPTOM_CHECKER_PLACES_TIMEOUT_SECS",
        "SYMPTOM_CHECKER_MODEL_TIMEOUT_SECS",
        "SYMPTOM_CHECKER_STORE_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("symptom-checker")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("default addr")
        );
        assert_eq!(settings.cors_origins(), DEFAULT_CORS_ORIGINS.to_vec());
        assert_eq!(
            settings.timeouts(),
            OutboundTimeouts {
                places: Duration::from_secs(10),
                model: Duration::from_secs(60),
                store: Duration::from_secs(10),
            }
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SYMPTOM_CHECKER_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "SYMPTOM_CHECKER_CORS_ORIGINS",
                Some("https://app.example, ,https://admin.example".to_owned()),
            ),
            ("SYMPTOM_CHECKER_PLACES_TIMEOUT_SECS", Some("3".to_owned())),
            ("SYMPTOM_CHECKER_MODEL_TIMEOUT_SECS", Some("90".to_owned())),
            ("SYMPTOM_CHECKER_STORE_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr").to_string(),
            "127.0.0.1:9090"
        );
        assert_eq!(
            settings.cors_origins(),
            vec!["https://app.example".to_owned(), "https://admin.example".to_owned()]
        );
        let timeouts = settings.timeouts();
        assert_eq!(timeouts.places, Duration::from_secs(3));
        assert_eq!(timeouts.model, Duration::from_secs(90));
        assert_eq!(timeouts.store, Duration::from_secs(10));
    }

    #[rstest]
    fn unparsable_bind_addr_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            ..ServerSettings::default()
        };
        let err = settings.bind_addr().expect_err("invalid addr");
        assert!(matches!(err, ConfigError::InvalidSetting { name: "bind_addr", .. }));
    }

    #[rstest]
    fn zero_timeout_falls_back_to_default() {
        let settings = ServerSettings {
            model_timeout_secs: Some(0),
            ..ServerSettings::default()
        };
        assert_eq!(settings.timeouts().model, Duration::from_secs(60));
    }
}
