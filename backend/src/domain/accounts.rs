//! Account use-cases: signup, login and bearer-token resolution.
//!
//! Password derivation is CPU bound, so hashing and verification run on the
//! blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::password::{PasswordHasher, verify_password};
use super::ports::{
    CurrentUserQuery, IssuedToken, LoginService, NewUser, SignupService, UserPersistenceError,
    UserRepository,
};
use super::token::AccessTokenSigner;
use super::{Email, Error, LoginCredentials, SignupDetails, StoredUser, User};

/// Message returned for any failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect email or password";
/// Message returned for any rejected bearer token.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Could not validate credentials";
/// Message returned when signup hits an existing email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "A user with this email already exists.";

/// Account service backed by a [`UserRepository`].
pub struct AccountService<R> {
    users: Arc<R>,
    hasher: PasswordHasher,
    tokens: AccessTokenSigner,
}

impl<R> AccountService<R> {
    pub fn new(users: Arc<R>, hasher: PasswordHasher, tokens: AccessTokenSigner) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_persistence_error(error: &UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { .. } => {
            Error::service_unavailable("user store is unavailable")
        }
        UserPersistenceError::Duplicate { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
        UserPersistenceError::MissingRow => Error::internal("Could not create user."),
        UserPersistenceError::Query { .. } | UserPersistenceError::Decode { .. } => {
            Error::internal(error.to_string())
        }
    }
}

async fn hash_blocking(hasher: PasswordHasher, password: &str) -> Result<String, Error> {
    let password = Zeroizing::new(password.to_owned());
    task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::invalid_request(err.to_string()))
}

async fn verify_blocking(password: &str, stored: &str) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    let stored = stored.to_owned();
    task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    async fn lookup(&self, email: &Email) -> Result<Option<StoredUser>, Error> {
        self.users.find_by_email(email).await.map_err(|err| {
            warn!(error = %err, "user lookup failed");
            map_persistence_error(&err)
        })
    }

    async fn upgrade_hash(&self, stored: &StoredUser, password: &str) {
        if !self.hasher.needs_rehash(&stored.password_hash) {
            return;
        }
        let rehashed = match hash_blocking(self.hasher, password).await {
            Ok(hash) => hash,
            Err(err) => {
                warn!(user_id = %stored.user.id, error = %err, "password rehash failed");
                return;
            }
        };
        match self
            .users
            .update_password_hash(stored.user.id, &rehashed)
            .await
        {
            Ok(()) => info!(user_id = %stored.user.id, "upgraded stored password hash"),
            Err(err) => {
                warn!(user_id = %stored.user.id, error = %err, "password hash update failed");
            }
        }
    }
}

#[async_trait]
impl<R> SignupService for AccountService<R>
where
    R: UserRepository,
{
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error> {
        let password_hash = hash_blocking(self.hasher, details.password()).await?;
        let new_user = NewUser {
            name: details.name().clone(),
            email: details.email().clone(),
            password_hash,
        };
        let user = self.users.create(&new_user).await.map_err(|err| {
            warn!(error = %err, "user creation failed");
            map_persistence_error(&err)
        })?;
        info!(user_id = %user.id, "user signed up");
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let Ok(email) = Email::new(credentials.username()) else {
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        };
        let Some(stored) = self.lookup(&email).await? else {
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        };
        if !verify_blocking(credentials.password(), &stored.password_hash).await? {
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        }

        self.upgrade_hash(&stored, credentials.password()).await;

        let token = self
            .tokens
            .issue(stored.user.email.as_ref())
            .map_err(|err| Error::internal(format!("token issue failed: {err}")))?;
        Ok(IssuedToken::bearer(token))
    }
}

#[async_trait]
impl<R> CurrentUserQuery for AccountService<R>
where
    R: UserRepository,
{
    async fn current_user(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.verify(token).map_err(|err| {
            info!(reason = %err, "bearer token rejected");
            Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
        })?;
        let email = Email::from_stored(&claims.sub);
        self.lookup(&email)
            .await?
            .map(|stored| stored.user)
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
    }
}
