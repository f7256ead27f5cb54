//! Driving port resolving a bearer token to the calling user.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port used by the bearer-token extractor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Verify `token` and load the user it names.
    ///
    /// Invalid or expired tokens and unknown subjects are reported as
    /// `unauthorized`; user store outages keep their own error code.
    async fn current_user(&self, token: &str) -> Result<User, Error>;
}
