//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Domain use-case port for registering a new user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Hash the password, store the user and return the public projection.
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error>;
}
