//! Shared PostgREST/Storage client and error classification.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::PostgrestErrorDto;
use crate::outbound::http_support::{AdapterBuildError, body_preview, build_client, join_endpoint};

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Classified failure of one Supabase call, mapped by each adapter into its
/// port error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupabaseFailure {
    /// The request never produced a response.
    Transport { message: String, timed_out: bool },
    /// A unique constraint rejected the write.
    UniqueViolation { message: String },
    /// Any other non-success status.
    Status { status: u16, message: String },
    /// The response body had an unexpected shape.
    Decode { message: String },
}

/// Authenticated client for one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    project_url: Url,
    api_key: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("project_url", &self.project_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Build a client for the project at `project_url` using the service key.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        project_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdapterBuildError> {
        Ok(Self {
            http: build_client(timeout)?,
            project_url,
            api_key: api_key.into(),
        })
    }

    pub(super) fn table_url(&self, table: &str) -> Result<Url, SupabaseFailure> {
        self.endpoint(&format!("rest/v1/{table}"))
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, SupabaseFailure> {
        join_endpoint(&self.project_url, path).map_err(|err| SupabaseFailure::Transport {
            message: err.to_string(),
            timed_out: false,
        })
    }

    pub(super) fn get(&self, url: Url) -> RequestBuilder {
        self.authorised(self.http.get(url))
    }

    pub(super) fn post(&self, url: Url) -> RequestBuilder {
        self.authorised(self.http.post(url))
    }

    pub(super) fn patch(&self, url: Url) -> RequestBuilder {
        self.authorised(self.http.patch(url))
    }

    fn authorised(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
    }

    /// Send `request` and return the body of a successful response.
    pub(super) async fn execute(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, SupabaseFailure> {
        let response = request.send().await.map_err(map_transport_error)?;
        read_success(response).await
    }

    /// Send `request` and decode a successful JSON body.
    pub(super) async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SupabaseFailure> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|err| SupabaseFailure::Decode {
            message: err.to_string(),
        })
    }
}

async fn read_success(response: Response) -> Result<Vec<u8>, SupabaseFailure> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if status.is_success() {
        Ok(body.to_vec())
    } else {
        Err(classify_status(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> SupabaseFailure {
    SupabaseFailure::Transport {
        timed_out: error.is_timeout(),
        message: error.to_string(),
    }
}

pub(super) fn classify_status(status: StatusCode, body: &[u8]) -> SupabaseFailure {
    let parsed = serde_json::from_slice::<PostgrestErrorDto>(body).ok();
    let is_unique = status == StatusCode::CONFLICT
        || parsed
            .as_ref()
            .and_then(|dto| dto.code.as_deref())
            .is_some_and(|code| code == UNIQUE_VIOLATION);
    let message = parsed
        .and_then(|dto| dto.message)
        .unwrap_or_else(|| body_preview(body));
    if is_unique {
        SupabaseFailure::UniqueViolation { message }
    } else {
        SupabaseFailure::Status {
            status: status.as_u16(),
            message,
        }
    }
}

impl std::fmt::Display for SupabaseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { message, .. } | Self::Decode { message } => f.write_str(message),
            Self::UniqueViolation { message } => write!(f, "unique violation: {message}"),
            Self::Status { status, message } => write!(f, "status {status}: {message}"),
        }
    }
}
