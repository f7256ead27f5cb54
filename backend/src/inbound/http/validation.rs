//! Shared validation helpers for inbound HTTP adapters.
//!
//! Validation failures become `invalid_request` errors whose details name the
//! offending field and a stable machine-readable code.

use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, SignupValidationError, SymptomValidationError, UserValidationError};

/// Build an `invalid_request` error tagged with `field` and `code`.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn user_field_code(err: &UserValidationError) -> &'static str {
    match err {
        UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::MalformedEmail => "malformed_email",
        UserValidationError::EmptyName => "empty_name",
        UserValidationError::NameTooLong { .. } => "name_too_long",
    }
}

pub(crate) fn signup_error(err: &SignupValidationError) -> Error {
    let code = match err {
        SignupValidationError::Name(inner) | SignupValidationError::Email(inner) => {
            user_field_code(inner)
        }
        SignupValidationError::EmptyPassword => "empty_password",
        SignupValidationError::PasswordTooLong { .. } => "password_too_long",
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn symptom_error(err: &SymptomValidationError) -> Error {
    let code = match err {
        SymptomValidationError::EmptySymptoms => "empty_symptoms",
        SymptomValidationError::SymptomsTooLong { .. } => "symptoms_too_long",
        SymptomValidationError::InvalidLatitude => "invalid_latitude",
        SymptomValidationError::InvalidLongitude => "invalid_longitude",
        SymptomValidationError::EmptyImage => "empty_image",
        SymptomValidationError::ImageTooLarge { .. } => "image_too_large",
        SymptomValidationError::NotAnImage { .. } => "not_an_image",
    };
    field_error(err.field(), code, err.to_string())
}

/// JSON extractor configuration reporting malformed bodies in the shared
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected JSON payload");
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Form extractor configuration reporting malformed bodies in the shared
/// error envelope.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected form payload");
        Error::invalid_request(format!("invalid form body: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SymptomValidationError::EmptySymptoms, "symptoms", "empty_symptoms")]
    #[case(SymptomValidationError::InvalidLongitude, "longitude", "invalid_longitude")]
    #[case(
        SymptomValidationError::NotAnImage { content_type: "text/plain".to_owned() },
        "image",
        "not_an_image"
    )]
    fn symptom_errors_name_field_and_code(
        #[case] err: SymptomValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = symptom_error(&err);
        assert_eq!(error.details(), Some(&json!({"field": field, "code": code})));
        assert_eq!(error.message(), err.to_string());
    }

    #[test]
    fn signup_email_errors_point_at_email() {
        let error = signup_error(&SignupValidationError::Email(
            UserValidationError::MalformedEmail,
        ));
        assert_eq!(
            error.details(),
            Some(&json!({"field": "email", "code": "malformed_email"}))
        );
    }
}
