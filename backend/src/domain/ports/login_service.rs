//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for an access token without knowing the backing
//! store or token format.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, LoginCredentials, TOKEN_TYPE};

/// Access token handed back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
}

impl IssuedToken {
    /// Wrap a bearer token string.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: TOKEN_TYPE,
        }
    }
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue an access token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}
