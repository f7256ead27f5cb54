//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CurrentUserQuery, HistoryQuery, LoginService, SignupService, SymptomCheckCommand,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use symptom_checker::domain::ports::{
///     CurrentUserQuery, HistoryQuery, LoginService, SignupService, SymptomCheckCommand,
/// };
/// use symptom_checker::inbound::http::state::HttpState;
///
/// fn build<A, S>(accounts: Arc<A>, checks: Arc<S>) -> HttpState
/// where
///     A: LoginService + SignupService + CurrentUserQuery + 'static,
///     S: SymptomCheckCommand + HistoryQuery + 'static,
/// {
///     HttpState {
///         login: accounts.clone(),
///         signup: accounts.clone(),
///         current_user: accounts,
///         symptom_checks: checks.clone(),
///         history: checks,
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub current_user: Arc<dyn CurrentUserQuery>,
    pub symptom_checks: Arc<dyn SymptomCheckCommand>,
    pub history: Arc<dyn HistoryQuery>,
}
