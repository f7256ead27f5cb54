//! Row and payload DTOs for the Supabase REST APIs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Email, StoredUser, User, UserId, UserName};

/// PostgREST error body.
#[derive(Debug, Deserialize)]
pub(super) struct PostgrestErrorDto {
    pub(super) code: Option<String>,
    pub(super) message: Option<String>,
}

/// Row of the `users` table.
#[derive(Debug, Deserialize)]
pub(super) struct UserRowDto {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) email: String,
    #[serde(default)]
    pub(super) hashed_password: Option<String>,
}

impl UserRowDto {
    /// Rows are trusted as written; only the primary key is checked.
    pub(super) fn into_user(self) -> Result<User, String> {
        Ok(User {
            id: UserId::new(self.id).map_err(|err| format!("user id {}: {err}", self.id))?,
            name: UserName::from_stored(self.name),
            email: Email::from_stored(&self.email),
        })
    }

    pub(super) fn into_stored_user(mut self) -> Result<StoredUser, String> {
        let password_hash = self.hashed_password.take().unwrap_or_default();
        Ok(StoredUser {
            user: self.into_user()?,
            password_hash,
        })
    }
}

/// Insert payload for `users`.
#[derive(Debug, Serialize)]
pub(super) struct NewUserRowDto<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) hashed_password: &'a str,
}

/// Update payload for a password rehash.
#[derive(Debug, Serialize)]
pub(super) struct PasswordUpdateDto<'a> {
    pub(super) hashed_password: &'a str,
}

/// Insert payload for `query_history`.
#[derive(Debug, Serialize)]
pub(super) struct NewHistoryRowDto<'a> {
    pub(super) user_id: i64,
    pub(super) symptom_text: &'a str,
    pub(super) response_data: &'a Value,
    pub(super) image_url: Option<&'a str>,
}
