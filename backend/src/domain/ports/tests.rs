use super::*;
use crate::domain::{Coordinates, UserId};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn fixture_locator_finds_nothing() {
    let near = Coordinates::new(51.5, -0.12).expect("coordinates");
    let hospitals = FixtureHospitalLocator.nearby(near).await.expect("lookup");
    assert!(hospitals.is_empty());
}

#[rstest]
#[tokio::test]
async fn fixture_history_is_empty() {
    let user_id = UserId::new(1).expect("user id");
    let rows = FixtureQueryHistoryRepository
        .list_for_user(user_id)
        .await
        .expect("history");
    assert!(rows.is_empty());
}

#[test]
fn port_errors_render_context() {
    assert_eq!(
        HospitalLocatorError::rejected(400_u16, "Invalid parameters").to_string(),
        "places search rejected with status 400: Invalid parameters"
    );
    assert_eq!(
        UserPersistenceError::duplicate("ada@example.org").to_string(),
        "user with email ada@example.org already exists"
    );
    assert_eq!(
        UserPersistenceError::missing_row().to_string(),
        "user repository returned no row"
    );
}

#[test]
fn issued_tokens_are_bearer() {
    let token = IssuedToken::bearer("abc");
    assert_eq!(token.token_type, "bearer");
}
