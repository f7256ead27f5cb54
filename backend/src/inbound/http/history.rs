//! Query history handler.

use actix_web::{get, web};

use crate::domain::HistoryEntry;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, HistoryEntrySchema};
use crate::inbound::http::state::HttpState;

/// List the caller's past symptom checks, newest first.
///
/// A store failure is logged by the service and yields an empty list.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "History rows", body = [HistoryEntrySchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "listHistory"
)]
#[get("/history")]
pub async fn list_history(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<HistoryEntry>>> {
    let rows = state.history.history(&user.into_inner()).await?;
    Ok(web::Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, TEST_BEARER};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn entry() -> HistoryEntry {
        serde_json::from_value(json!({
            "id": 11,
            "user_id": 7,
            "symptom_text": "headache",
            "response_data": {"disclaimer": "d"},
            "image_url": null,
            "created_at": "2025-03-01T09:30:00Z"
        }))
        .expect("history entry")
    }

    #[actix_web::test]
    async fn returns_rows_for_authenticated_user() {
        let mut ports = MockPorts::authenticating();
        ports
            .history
            .expect_history()
            .withf(|user| user.id.get() == 7)
            .times(1)
            .returning(|_| Ok(vec![entry()]));
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(list_history),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/history")
            .insert_header((AUTHORIZATION, TEST_BEARER))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body[0]["symptom_text"], "headache");
        assert_eq!(body[0]["created_at"], "2025-03-01T09:30:00Z");
    }

    #[actix_web::test]
    async fn requires_bearer_token() {
        let mut ports = MockPorts::default();
        ports.history.expect_history().never();
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(list_history),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/history").to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
