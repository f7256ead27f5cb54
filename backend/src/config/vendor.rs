//! Vendor credentials and token settings read from the environment.

use std::fmt;

use chrono::Duration;
use mockable::Env;
use reqwest::Url;
use zeroize::Zeroizing;

use super::ConfigError;
use crate::domain::token::{DEFAULT_TOKEN_TTL_MINUTES, TOKEN_ALGORITHM};
use crate::outbound::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::outbound::geoapify::DEFAULT_GEOAPIFY_BASE_URL;
use crate::outbound::supabase::DEFAULT_IMAGE_BUCKET;

const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
const GEOAPIFY_API_KEY_ENV: &str = "GEOAPIFY_API_KEY";
const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
const SUPABASE_KEY_ENV: &str = "SUPABASE_KEY";
const SECRET_KEY_ENV: &str = "SECRET_KEY";
const ALGORITHM_ENV: &str = "ALGORITHM";
const TOKEN_TTL_ENV: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";
const GEMINI_BASE_URL_ENV: &str = "GEMINI_BASE_URL";
const GEOAPIFY_BASE_URL_ENV: &str = "GEOAPIFY_BASE_URL";
const IMAGE_BUCKET_ENV: &str = "SUPABASE_IMAGE_BUCKET";

const URL_EXPECTED: &str = "an absolute http(s) URL";
const MINUTES_EXPECTED: &str = "a positive number of minutes";

/// Credentials and endpoints for the hosted collaborators.
pub struct VendorSettings {
    pub google_api_key: Zeroizing<String>,
    pub geoapify_api_key: Zeroizing<String>,
    pub supabase_url: Url,
    pub supabase_key: Zeroizing<String>,
    pub secret_key: Zeroizing<String>,
    pub token_ttl: Duration,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    pub geoapify_base_url: Url,
    pub image_bucket: String,
}

impl fmt::Debug for VendorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorSettings")
            .field("supabase_url", &self.supabase_url.as_str())
            .field("token_ttl_minutes", &self.token_ttl.num_minutes())
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url.as_str())
            .field("geoapify_base_url", &self.geoapify_base_url.as_str())
            .field("image_bucket", &self.image_bucket)
            .finish_non_exhaustive()
    }
}

/// Build vendor settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use symptom_checker::config::vendor_settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "GOOGLE_API_KEY" => Some("g-key".to_owned()),
///     "GEOAPIFY_API_KEY" => Some("p-key".to_owned()),
///     "SUPABASE_URL" => Some("https://abc.supabase.co".to_owned()),
///     "SUPABASE_KEY" => Some("service-key".to_owned()),
///     "SECRET_KEY" => Some("signing-secret".to_owned()),
///     _ => None,
/// });
///
/// let settings = vendor_settings_from_env(&env).unwrap();
/// assert_eq!(settings.token_ttl.num_minutes(), 30);
/// assert_eq!(settings.gemini_model, "gemini-2.5-flash");
/// ```
pub fn vendor_settings_from_env<E: Env>(env: &E) -> Result<VendorSettings, ConfigError> {
    check_algorithm(env)?;
    Ok(VendorSettings {
        google_api_key: required(env, GOOGLE_API_KEY_ENV)?,
        geoapify_api_key: required(env, GEOAPIFY_API_KEY_ENV)?,
        supabase_url: parse_url(SUPABASE_URL_ENV, required(env, SUPABASE_URL_ENV)?.as_str())?,
        supabase_key: required(env, SUPABASE_KEY_ENV)?,
        secret_key: required(env, SECRET_KEY_ENV)?,
        token_ttl: token_ttl(env)?,
        gemini_model: optional(env, GEMINI_MODEL_ENV)
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
        gemini_base_url: optional_url(env, GEMINI_BASE_URL_ENV, DEFAULT_GEMINI_BASE_URL)?,
        geoapify_base_url: optional_url(env, GEOAPIFY_BASE_URL_ENV, DEFAULT_GEOAPIFY_BASE_URL)?,
        image_bucket: optional(env, IMAGE_BUCKET_ENV)
            .unwrap_or_else(|| DEFAULT_IMAGE_BUCKET.to_owned()),
    })
}

fn optional<E: Env>(env: &E, name: &'static str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<Zeroizing<String>, ConfigError> {
    optional(env, name)
        .map(Zeroizing::new)
        .ok_or(ConfigError::MissingEnv { name })
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_owned(),
            expected: URL_EXPECTED,
        }),
    }
}

fn optional_url<E: Env>(
    env: &E,
    name: &'static str,
    default: &str,
) -> Result<Url, ConfigError> {
    match optional(env, name) {
        Some(value) => parse_url(name, &value),
        None => parse_url(name, default),
    }
}

fn check_algorithm<E: Env>(env: &E) -> Result<(), ConfigError> {
    match optional(env, ALGORITHM_ENV) {
        None => Ok(()),
        Some(value) if value == TOKEN_ALGORITHM => Ok(()),
        Some(value) => Err(ConfigError::InvalidEnv {
            name: ALGORITHM_ENV,
            value,
            expected: TOKEN_ALGORITHM,
        }),
    }
}

fn token_ttl<E: Env>(env: &E) -> Result<Duration, ConfigError> {
    let Some(value) = optional(env, TOKEN_TTL_ENV) else {
        return Ok(Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));
    };
    match value.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(Duration::minutes(minutes)),
        _ => Err(ConfigError::InvalidEnv {
            name: TOKEN_TTL_ENV,
            value,
            expected: MINUTES_EXPECTED,
        }),
    }
}
