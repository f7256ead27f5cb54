//! Handler tests for signup and login.

use super::*;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::test_utils::{MockPorts, ada};
use crate::inbound::http::validation::{form_config, json_config};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::rstest;
use serde_json::{Value, json};

async fn call(ports: MockPorts, request: test::TestRequest) -> actix_web::dev::ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(ports.into_state())
            .app_data(json_config())
            .app_data(form_config())
            .service(signup)
            .service(login),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

#[actix_web::test]
async fn signup_returns_public_user() {
    let mut ports = MockPorts::default();
    ports
        .signup
        .expect_signup()
        .withf(|details| {
            details.email().as_ref() == "ada@example.org" && details.password() == "pw"
        })
        .times(1)
        .returning(|_| Ok(ada()));

    let response = call(
        ports,
        test::TestRequest::post().uri("/signup").set_json(json!({
            "name": "Ada",
            "email": " Ada@Example.org ",
            "password": "pw"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"id": 7, "name": "Ada", "email": "ada@example.org"}));
}

#[rstest]
#[case(json!({"name": "", "email": "ada@example.org", "password": "pw"}), "name", "empty_name")]
#[case(json!({"name": "Ada", "email": "ada", "password": "pw"}), "email", "malformed_email")]
#[case(json!({"name": "Ada", "email": "ada@example.org", "password": ""}), "password", "empty_password")]
#[actix_web::test]
async fn signup_validation_names_field(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::default();
    ports.signup.expect_signup().never();

    let response = call(ports, test::TestRequest::post().uri("/signup").set_json(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(response).await;
    assert_eq!(body.details(), Some(&json!({"field": field, "code": code})));
}

#[actix_web::test]
async fn signup_conflict_is_409() {
    let mut ports = MockPorts::default();
    ports
        .signup
        .expect_signup()
        .returning(|_| Err(Error::conflict("A user with this email already exists.")));

    let response = call(
        ports,
        test::TestRequest::post().uri("/signup").set_json(json!({
            "name": "Ada",
            "email": "ada@example.org",
            "password": "pw"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn malformed_signup_json_uses_error_envelope() {
    let response = call(
        MockPorts::default(),
        test::TestRequest::post()
            .uri("/signup")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Error = test::read_body_json(response).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}

#[actix_web::test]
async fn login_accepts_form_and_returns_bearer_token() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .withf(|creds| creds.username() == "ada@example.org" && creds.password() == "pw")
        .times(1)
        .returning(|_| Ok(IssuedToken::bearer("signed.jwt.value")));

    let response = call(
        ports,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "ada@example.org"), ("password", "pw")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"access_token": "signed.jwt.value", "token_type": "bearer"})
    );
}

#[actix_web::test]
async fn login_failure_is_401() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .returning(|_| Err(Error::unauthorized("Incorrect email or password")));

    let response = call(
        ports,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "ada@example.org"), ("password", "nope")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Error = test::read_body_json(response).await;
    assert_eq!(body.message(), "Incorrect email or password");
}

#[actix_web::test]
async fn blank_login_username_is_400() {
    let mut ports = MockPorts::default();
    ports.login.expect_login().never();

    let response = call(
        ports,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "  "), ("password", "pw")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
