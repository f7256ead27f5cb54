//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and the
//! outbound adapters, plus the use-case services that orchestrate them. Keep
//! types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure envelope.
//! - User, Email, UserName, UserId: account identity.
//! - SymptomText, Coordinates, SymptomImage: symptom submissions.
//! - SymptomAnalysis, HospitalLookup: model output and enrichment.
//! - AccountService, SymptomCheckService: driving port implementations.

pub mod accounts;
pub mod analysis;
pub mod auth;
pub mod error;
pub mod history;
pub mod password;
pub mod ports;
pub mod symptom_check;
pub mod symptoms;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountService;
pub use self::analysis::{Condition, Hospital, HospitalLookup, SymptomAnalysis};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX_BYTES, SignupDetails,
    SignupValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::history::{HistoryEntry, NewHistoryEntry};
pub use self::symptom_check::{SymptomCheckPorts, SymptomCheckService};
pub use self::symptoms::{
    Coordinates, DEFAULT_IMAGE_SYMPTOMS, SymptomImage, SymptomText, SymptomValidationError,
};
pub use self::token::{AccessTokenSigner, Claims, TOKEN_TYPE, TokenError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, StoredUser, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use symptom_checker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Could not validate credentials"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
