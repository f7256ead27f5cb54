//! Checks on the generated OpenAPI document as consumed by external tooling.

use rstest::{fixture, rstest};
use serde_json::Value;
use symptom_checker::doc::ApiDoc;
use utoipa::OpenApi;

#[fixture]
fn document() -> Value {
    let json = ApiDoc::openapi().to_json().expect("valid JSON");
    serde_json::from_str(&json).expect("parsable document")
}

#[rstest]
#[case("/signup", "post")]
#[case("/login", "post")]
#[case("/analyze/text", "post")]
#[case("/analyze/image", "post")]
#[case("/history", "get")]
fn only_account_routes_opt_out_of_bearer_security(
    document: Value,
    #[case] path: &str,
    #[case] method: &str,
) {
    let operation = &document["paths"][path][method];
    assert!(operation.is_object(), "{method} {path} missing");
    let public = matches!(path, "/signup" | "/login");
    let security = operation.get("security");
    if public {
        let security = security.expect("public routes override global security");
        assert!(!security.to_string().contains("BearerAuth"));
    } else {
        assert!(security.is_none(), "{path} should inherit bearer security");
    }
}

#[rstest]
fn global_security_requires_bearer(document: Value) {
    assert_eq!(document["security"], serde_json::json!([{"BearerAuth": []}]));
    assert_eq!(
        document["components"]["securitySchemes"]["BearerAuth"]["scheme"],
        "bearer"
    );
}

#[rstest]
fn login_accepts_form_encoding(document: Value) {
    let content = &document["paths"]["/login"]["post"]["requestBody"]["content"];
    assert!(content["application/x-www-form-urlencoded"].is_object());
}

#[rstest]
fn image_analysis_accepts_multipart(document: Value) {
    let content = &document["paths"]["/analyze/image"]["post"]["requestBody"]["content"];
    assert!(content["multipart/form-data"].is_object());
}
