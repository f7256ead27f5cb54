//! Driven port for the query history table.

use async_trait::async_trait;

use crate::domain::{HistoryEntry, NewHistoryEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by history persistence adapters.
    pub enum HistoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "history repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "history repository query failed: {message}",
        /// Stored rows could not be decoded.
        Decode { message: String } => "history row decode failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryHistoryRepository: Send + Sync {
    /// Append one interaction to the user's history.
    async fn record(&self, entry: &NewHistoryEntry) -> Result<(), HistoryPersistenceError>;

    /// Return the user's history, newest first.
    async fn list_for_user(&self, user_id: UserId)
    -> Result<Vec<HistoryEntry>, HistoryPersistenceError>;
}

/// Fixture repository that accepts writes and reports no history.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureQueryHistoryRepository;

#[async_trait]
impl QueryHistoryRepository for FixtureQueryHistoryRepository {
    async fn record(&self, _entry: &NewHistoryEntry) -> Result<(), HistoryPersistenceError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<HistoryEntry>, HistoryPersistenceError> {
        Ok(Vec::new())
    }
}
