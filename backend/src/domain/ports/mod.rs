//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `SignupService`, `CurrentUserQuery`,
//! `SymptomCheckCommand`, `HistoryQuery`) are called by inbound adapters.
//! Driven ports (`UserRepository`, `QueryHistoryRepository`,
//! `SymptomImageStore`, `SymptomAnalyzer`, `HospitalLocator`) are implemented
//! by outbound adapters and expose typed errors.

mod macros;
pub(crate) use macros::define_port_error;

mod current_user_query;
mod history_query;
mod history_repository;
mod hospital_locator;
mod image_store;
mod login_service;
mod signup_service;
mod symptom_analyzer;
mod symptom_check_command;
mod user_repository;

#[cfg(test)]
pub use current_user_query::MockCurrentUserQuery;
pub use current_user_query::CurrentUserQuery;
#[cfg(test)]
pub use history_query::MockHistoryQuery;
pub use history_query::HistoryQuery;
#[cfg(test)]
pub use history_repository::MockQueryHistoryRepository;
pub use history_repository::{
    FixtureQueryHistoryRepository, HistoryPersistenceError, QueryHistoryRepository,
};
#[cfg(test)]
pub use hospital_locator::MockHospitalLocator;
pub use hospital_locator::{FixtureHospitalLocator, HospitalLocator, HospitalLocatorError};
#[cfg(test)]
pub use image_store::MockSymptomImageStore;
pub use image_store::{ImageStoreError, SymptomImageStore};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{IssuedToken, LoginService};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use symptom_analyzer::MockSymptomAnalyzer;
pub use symptom_analyzer::{SymptomAnalyzer, SymptomAnalyzerError};
#[cfg(test)]
pub use symptom_check_command::MockSymptomCheckCommand;
pub use symptom_check_command::{ImageCheckRequest, SymptomCheckCommand, TextCheckRequest};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
