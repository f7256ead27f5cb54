//! PostgREST-backed `QueryHistoryRepository`.

use async_trait::async_trait;

use super::client::{SupabaseClient, SupabaseFailure};
use super::dto::NewHistoryRowDto;
use crate::domain::ports::{HistoryPersistenceError, QueryHistoryRepository};
use crate::domain::{HistoryEntry, NewHistoryEntry, UserId};

const HISTORY_TABLE: &str = "query_history";

/// History repository over the `query_history` table.
#[derive(Debug, Clone)]
pub struct SupabaseHistoryRepository {
    client: SupabaseClient,
}

impl SupabaseHistoryRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn map_failure(failure: SupabaseFailure) -> HistoryPersistenceError {
    match failure {
        SupabaseFailure::Transport { message, .. } => HistoryPersistenceError::connection(message),
        SupabaseFailure::Decode { message } => HistoryPersistenceError::decode(message),
        other @ (SupabaseFailure::UniqueViolation { .. } | SupabaseFailure::Status { .. }) => {
            HistoryPersistenceError::query(other.to_string())
        }
    }
}

#[async_trait]
impl QueryHistoryRepository for SupabaseHistoryRepository {
    async fn record(&self, entry: &NewHistoryEntry) -> Result<(), HistoryPersistenceError> {
        let url = self.client.table_url(HISTORY_TABLE).map_err(map_failure)?;
        let payload = NewHistoryRowDto {
            user_id: entry.user_id.get(),
            symptom_text: entry.symptom_text.as_str(),
            response_data: &entry.response_data,
            image_url: entry.image_url.as_deref(),
        };
        self.client
            .execute(
                self.client
                    .post(url)
                    .header("Prefer", "return=minimal")
                    .json(&payload),
            )
            .await
            .map_err(map_failure)?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<HistoryEntry>, HistoryPersistenceError> {
        let url = self.client.table_url(HISTORY_TABLE).map_err(map_failure)?;
        self.client
            .execute_json(self.client.get(url).query(&[
                ("select", "*".to_owned()),
                ("user_id", format!("eq.{user_id}")),
                ("order", "created_at.desc".to_owned()),
            ]))
            .await
            .map_err(map_failure)
    }
}
