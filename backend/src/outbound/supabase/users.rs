//! PostgREST-backed `UserRepository`.

use async_trait::async_trait;

use super::client::{SupabaseClient, SupabaseFailure};
use super::dto::{NewUserRowDto, PasswordUpdateDto, UserRowDto};
use crate::domain::ports::{NewUser, UserPersistenceError, UserRepository};
use crate::domain::{Email, StoredUser, User, UserId};

const USERS_TABLE: &str = "users";
const LOOKUP_LIMIT: &str = "5";

/// User repository over the `users` table.
#[derive(Debug, Clone)]
pub struct SupabaseUserRepository {
    client: SupabaseClient,
}

impl SupabaseUserRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn map_failure(failure: SupabaseFailure, email: Option<&Email>) -> UserPersistenceError {
    match failure {
        SupabaseFailure::Transport { message, .. } => UserPersistenceError::connection(message),
        SupabaseFailure::UniqueViolation { message } => match email {
            Some(email) => UserPersistenceError::duplicate(email.as_ref()),
            None => UserPersistenceError::query(message),
        },
        failure @ SupabaseFailure::Status { .. } => {
            UserPersistenceError::query(failure.to_string())
        }
        SupabaseFailure::Decode { message } => UserPersistenceError::decode(message),
    }
}

/// Case-insensitive PostgREST filter for `email`.
///
/// `%`, `_` and `\` are escaped for `ILIKE`. PostgREST rewrites `*` to `%`,
/// so it becomes the single-character wildcard and callers re-check the rows.
fn email_filter(email: &Email) -> String {
    let mut pattern = String::with_capacity(email.as_ref().len() + 6);
    pattern.push_str("ilike.");
    for ch in email.as_ref().chars() {
        match ch {
            '%' | '_' | '\\' => {
                pattern.push('\\');
                pattern.push(ch);
            }
            '*' => pattern.push('_'),
            _ => pattern.push(ch),
        }
    }
    pattern
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let url = self
            .client
            .table_url(USERS_TABLE)
            .map_err(|failure| map_failure(failure, None))?;
        let payload = NewUserRowDto {
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            hashed_password: &user.password_hash,
        };
        let rows: Vec<UserRowDto> = self
            .client
            .execute_json(
                self.client
                    .post(url)
                    .header("Prefer", "return=representation")
                    .json(&payload),
            )
            .await
            .map_err(|failure| map_failure(failure, Some(&user.email)))?;
        rows.into_iter()
            .next()
            .ok_or_else(UserPersistenceError::missing_row)?
            .into_user()
            .map_err(UserPersistenceError::decode)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let url = self
            .client
            .table_url(USERS_TABLE)
            .map_err(|failure| map_failure(failure, None))?;
        let rows: Vec<UserRowDto> = self
            .client
            .execute_json(self.client.get(url).query(&[
                ("select", "*".to_owned()),
                ("email", email_filter(email)),
                ("limit", LOOKUP_LIMIT.to_owned()),
            ]))
            .await
            .map_err(|failure| map_failure(failure, None))?;
        rows.into_iter()
            .find(|row| email.matches(&Email::from_stored(&row.email)))
            .map(UserRowDto::into_stored_user)
            .transpose()
            .map_err(UserPersistenceError::decode)
    }

    async fn update_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let url = self
            .client
            .table_url(USERS_TABLE)
            .map_err(|failure| map_failure(failure, None))?;
        self.client
            .execute(
                self.client
                    .patch(url)
                    .query(&[("id", format!("eq.{id}"))])
                    .header("Prefer", "return=minimal")
                    .json(&PasswordUpdateDto {
                        hashed_password: password_hash,
                    }),
            )
            .await
            .map_err(|failure| map_failure(failure, None))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn unique_violation_on_insert_is_duplicate() {
        let email = Email::new("ada@example.org").expect("email");
        let error = map_failure(
            SupabaseFailure::UniqueViolation {
                message: "duplicate key".to_owned(),
            },
            Some(&email),
        );
        assert_eq!(error, UserPersistenceError::duplicate("ada@example.org"));
    }

    #[rstest]
    #[case("ada@example.org", "ilike.ada@example.org")]
    #[case("first_last@example.org", "ilike.first\\_last@example.org")]
    #[case("100%@example.org", "ilike.100\\%@example.org")]
    #[case("star*@example.org", "ilike.star_@example.org")]
    fn email_lookup_ignores_case_and_escapes_wildcards(#[case] raw: &str, #[case] expected: &str) {
        let email = Email::new(raw).expect("email");
        assert_eq!(email_filter(&email), expected);
    }

    #[rstest]
    #[case(
        SupabaseFailure::Transport { message: "refused".to_owned(), timed_out: false },
        UserPersistenceError::connection("refused")
    )]
    #[case(
        SupabaseFailure::Status { status: 500, message: "boom".to_owned() },
        UserPersistenceError::query("status 500: boom")
    )]
    #[case(
        SupabaseFailure::Decode { message: "expected array".to_owned() },
        UserPersistenceError::decode("expected array")
    )]
    fn maps_failures(#[case] failure: SupabaseFailure, #[case] expected: UserPersistenceError) {
        assert_eq!(map_failure(failure, None), expected);
    }
}
