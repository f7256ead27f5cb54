//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (accounts,
//!   analysis, history, health)
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] plus the request and response bodies
//!   declared next to the handlers
//! - **Security**: HTTP bearer authentication carrying the access token
//!   issued by `POST /login`
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::analyze::{ImageAnalysisForm, TextAnalysisRequest};
use crate::inbound::http::health::RootResponse;
use crate::inbound::http::schemas::{
    ConditionSchema, ErrorCodeSchema, ErrorSchema, HistoryEntrySchema, HospitalSchema,
    SymptomAnalysisSchema, UserSchema,
};
use crate::inbound::http::users::{LoginForm, SignupRequest, TokenResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Symptom checker API",
        description = "Account management, AI-assisted symptom analysis with nearby hospital lookup, and per-user query history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::analyze::analyze_text,
        crate::inbound::http::analyze::analyze_image,
        crate::inbound::http::history::list_history,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        ConditionSchema,
        HospitalSchema,
        SymptomAnalysisSchema,
        HistoryEntrySchema,
        SignupRequest,
        LoginForm,
        TokenResponse,
        TextAnalysisRequest,
        ImageAnalysisForm,
        RootResponse,
    )),
    tags(
        (name = "users", description = "Signup and login"),
        (name = "analysis", description = "Symptom analysis from text or photos"),
        (name = "history", description = "Previous symptom checks of the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.User";
    const ANALYSIS_SCHEMA_NAME: &str = "crate.domain.SymptomAnalysis";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    fn schema(name: &str) -> RefOr<Schema> {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        components
            .schemas
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("{name} schema"))
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, &["code", "message", "traceId", "details"])]
    #[case(USER_SCHEMA_NAME, &["id", "name", "email"])]
    #[case(
        ANALYSIS_SCHEMA_NAME,
        &["possible_conditions", "recommended_next_steps", "disclaimer", "nearby_hospitals"]
    )]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let schema = schema(name);
        for field in fields {
            assert_object_schema_has_field(&schema, field);
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/signup")]
    #[case("/login")]
    #[case("/analyze/text")]
    #[case("/analyze/image")]
    #[case("/history")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
