//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockCurrentUserQuery, MockHistoryQuery, MockLoginService, MockSignupService,
    MockSymptomCheckCommand,
};
use crate::domain::{Email, User, UserId, UserName};

use super::state::HttpState;

/// Bearer header value accepted by [`MockPorts::authenticating`].
pub const TEST_BEARER: &str = "Bearer test-token";

/// One mock per driving port; set expectations then call
/// [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub signup: MockSignupService,
    pub current_user: MockCurrentUserQuery,
    pub symptom_checks: MockSymptomCheckCommand,
    pub history: MockHistoryQuery,
}

impl MockPorts {
    /// Ports whose token lookup resolves `test-token` to [`ada`].
    pub fn authenticating() -> Self {
        let mut ports = Self::default();
        ports
            .current_user
            .expect_current_user()
            .withf(|token| token == "test-token")
            .returning(|_| Ok(ada()));
        ports
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            signup: Arc::new(self.signup),
            current_user: Arc::new(self.current_user),
            symptom_checks: Arc::new(self.symptom_checks),
            history: Arc::new(self.history),
        })
    }
}

pub fn ada() -> User {
    User {
        id: UserId::new(7).expect("fixture id"),
        name: UserName::new("Ada").expect("fixture name"),
        email: Email::new("ada@example.org").expect("fixture email"),
    }
}
