//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

#![expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The model or places service failed.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Persisting user content failed.
    #[schema(rename = "storage_failure")]
    StorageFailure,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Incorrect email or password")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 7)]
    id: i64,
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Lowercased login email.
    #[schema(example = "ada@example.org")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::Condition`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Condition)]
pub struct ConditionSchema {
    #[schema(example = "Common cold")]
    condition: String,
    /// Model-reported likelihood; usually a percentage string.
    #[schema(value_type = Object, example = "60%")]
    confidence_score: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::Hospital`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Hospital)]
pub struct HospitalSchema {
    #[schema(example = "St Thomas' Hospital")]
    name: String,
    #[schema(example = "Westminster Bridge Road, London SE1 7EH")]
    address: String,
    /// Whole metres from the submitted coordinates.
    #[schema(example = 850)]
    distance_meters: u64,
}

/// OpenAPI schema for [`crate::domain::SymptomAnalysis`].
///
/// `nearby_hospitals` is present only when both coordinates were supplied.
/// It holds either a list of hospitals or an `{"error": "..."}` object when
/// the lookup failed.
#[derive(ToSchema)]
#[schema(as = crate::domain::SymptomAnalysis)]
pub struct SymptomAnalysisSchema {
    possible_conditions: Vec<ConditionSchema>,
    #[schema(value_type = Object, example = "Rest, fluids, and see a GP if symptoms persist.")]
    recommended_next_steps: serde_json::Value,
    disclaimer: String,
    #[schema(value_type = Object)]
    nearby_hospitals: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::HistoryEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HistoryEntry)]
pub struct HistoryEntrySchema {
    id: i64,
    user_id: i64,
    symptom_text: String,
    response_data: SymptomAnalysisSchema,
    image_url: Option<String>,
    /// RFC 3339 timestamp assigned by the store.
    #[schema(value_type = Option<String>, format = DateTime)]
    created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "conflict",
            "upstream_failure",
            "service_unavailable",
            "storage_failure",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_to_json::<ErrorSchema>().contains("traceId"));
    }

    #[test]
    fn analysis_schema_lists_public_fields() {
        let schema_json = schema_to_json::<SymptomAnalysisSchema>();
        for field in [
            "possible_conditions",
            "recommended_next_steps",
            "disclaimer",
            "nearby_hospitals",
        ] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
