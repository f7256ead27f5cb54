//! Account handlers.
//!
//! ```text
//! POST /signup {"name":"Ada","email":"ada@example.org","password":"..."}
//! POST /login  username=ada@example.org&password=...   (form-urlencoded)
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::IssuedToken;
use crate::domain::{Error, LoginCredentials, LoginValidationError, SignupDetails, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, signup_error};

/// Signup request body for `POST /signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    pub password: String,
}

/// OAuth2 password-flow form for `POST /login`; `username` carries the email.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginForm {
    #[schema(example = "ada@example.org")]
    pub username: String,
    pub password: String,
}

/// Token returned by `POST /login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(value: IssuedToken) -> Self {
        Self {
            access_token: value.access_token,
            token_type: value.token_type.to_owned(),
        }
    }
}

fn login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            field_error("username", "empty_username", err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", err.to_string())
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<User>> {
    let SignupRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let details =
        SignupDetails::try_from_parts(&name, &email, &password).map_err(|err| signup_error(&err))?;
    let user = state.signup.signup(&details).await?;
    Ok(web::Json(user))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Incorrect email or password", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<web::Json<TokenResponse>> {
    let LoginForm { username, password } = form.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).map_err(login_validation_error)?;
    let issued = state.login.login(&credentials).await?;
    Ok(web::Json(issued.into()))
}

#[cfg(test)]
mod tests;
