//! Driving port for reading a user's symptom-check history.

use async_trait::async_trait;

use crate::domain::{Error, HistoryEntry, User};

/// Domain use-case port for `GET /history`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// Return the user's history, newest first.
    async fn history(&self, user: &User) -> Result<Vec<HistoryEntry>, Error>;
}
