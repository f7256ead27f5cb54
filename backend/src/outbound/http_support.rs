//! Helpers shared by the reqwest-backed adapters.

use std::time::Duration;

use reqwest::{Client, Url};

/// Failure to construct an outbound HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// A configured base URL could not be extended into an endpoint.
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Build a client with a whole-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, AdapterBuildError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Append `path` to `base`, keeping any path prefix `base` already has.
pub(crate) fn join_endpoint(base: &Url, path: &str) -> Result<Url, AdapterBuildError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

/// Compact, length-limited rendering of a response body for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.example.com", "v2/places", "https://api.example.com/v2/places")]
    #[case("https://api.example.com/", "/v2/places", "https://api.example.com/v2/places")]
    #[case("http://localhost:8000/proxy", "rest/v1/users", "http://localhost:8000/proxy/rest/v1/users")]
    fn joins_paths_onto_base(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("base url");
        assert_eq!(join_endpoint(&base, path).expect("joined").as_str(), expected);
    }

    #[test]
    fn preview_compacts_whitespace() {
        assert_eq!(body_preview(b"{\n  \"error\":   \"x\" }"), "{ \"error\": \"x\" }");
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "a".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
