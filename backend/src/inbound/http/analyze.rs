//! Symptom analysis handlers.
//!
//! ```text
//! POST /analyze/text   {"symptoms":"...","latitude":51.5,"longitude":-0.12}
//! POST /analyze/image  multipart: image=<file>, symptoms?, latitude?, longitude?
//! ```
//!
//! Both require a bearer token. Coordinates are used only when both are
//! present; a lone latitude or longitude is ignored.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{post, web};
use futures_util::TryStreamExt as _;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ImageCheckRequest, TextCheckRequest};
use crate::domain::symptoms::SYMPTOM_IMAGE_MAX_BYTES;
use crate::domain::{
    Coordinates, Error, SymptomAnalysis, SymptomImage, SymptomText, SymptomValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, SymptomAnalysisSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, symptom_error};

/// Upper bound on a non-file multipart field.
const FORM_TEXT_MAX_BYTES: usize = 64 * 1024;

/// Body of `POST /analyze/text`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TextAnalysisRequest {
    #[schema(example = "Sore throat, mild fever and a runny nose for two days")]
    pub symptoms: String,
    #[schema(example = 51.5074)]
    pub latitude: Option<f64>,
    #[schema(example = -0.1278)]
    pub longitude: Option<f64>,
}

/// Multipart form accepted by `POST /analyze/image`.
#[derive(utoipa::ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ImageAnalysisForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    symptoms: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Analyse free-text symptoms.
#[utoipa::path(
    post,
    path = "/analyze/text",
    request_body = TextAnalysisRequest,
    responses(
        (status = 200, description = "Analysis", body = SymptomAnalysisSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 502, description = "Model call failed", body = ErrorSchema)
    ),
    tags = ["analysis"],
    operation_id = "analyzeText"
)]
#[post("/analyze/text")]
pub async fn analyze_text(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<TextAnalysisRequest>,
) -> ApiResult<web::Json<SymptomAnalysis>> {
    let TextAnalysisRequest {
        symptoms,
        latitude,
        longitude,
    } = payload.into_inner();
    let request = TextCheckRequest {
        symptoms: SymptomText::new(symptoms).map_err(|err| symptom_error(&err))?,
        location: Coordinates::from_optional(latitude, longitude)
            .map_err(|err| symptom_error(&err))?,
    };
    let analysis = state
        .symptom_checks
        .check_text(&user.into_inner(), request)
        .await?;
    Ok(web::Json(analysis))
}

/// Upload a photo and analyse it together with optional symptom text.
#[utoipa::path(
    post,
    path = "/analyze/image",
    request_body(content = ImageAnalysisForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis", body = SymptomAnalysisSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Image upload failed", body = ErrorSchema),
        (status = 502, description = "Model call failed", body = ErrorSchema)
    ),
    tags = ["analysis"],
    operation_id = "analyzeImage"
)]
#[post("/analyze/image")]
pub async fn analyze_image(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: Multipart,
) -> ApiResult<web::Json<SymptomAnalysis>> {
    let request = read_image_form(payload).await?.into_request()?;
    let analysis = state
        .symptom_checks
        .check_image(&user.into_inner(), request)
        .await?;
    Ok(web::Json(analysis))
}

#[derive(Debug, Default)]
struct ImageFormFields {
    image: Option<(Vec<u8>, Option<String>)>,
    symptoms: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl ImageFormFields {
    fn into_request(self) -> Result<ImageCheckRequest, Error> {
        let (bytes, content_type) = self
            .image
            .ok_or_else(|| field_error("image", "missing_image", "image file is required"))?;
        Ok(ImageCheckRequest {
            symptoms: SymptomText::for_image(self.symptoms.as_deref())
                .map_err(|err| symptom_error(&err))?,
            image: SymptomImage::new(bytes, content_type.as_deref())
                .map_err(|err| symptom_error(&err))?,
            location: Coordinates::from_optional(self.latitude, self.longitude)
                .map_err(|err| symptom_error(&err))?,
        })
    }
}

fn multipart_error(err: MultipartError) -> Error {
    Error::invalid_request(format!("invalid multipart body: {err}"))
}

/// Read a field into memory, returning `None` once it exceeds `limit` bytes.
async fn read_field(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if buf.len() + chunk.len() > limit {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Some(buf))
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, Error> {
    let bytes = read_field(field, FORM_TEXT_MAX_BYTES)
        .await?
        .ok_or_else(|| field_error(name, "field_too_long", format!("{name} is too long")))?;
    String::from_utf8(bytes)
        .map_err(|_| field_error(name, "invalid_utf8", format!("{name} must be UTF-8 text")))
}

fn parse_coordinate(
    raw: &str,
    invalid: SymptomValidationError,
) -> Result<Option<f64>, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| symptom_error(&invalid))
}

async fn read_image_form(mut payload: Multipart) -> Result<ImageFormFields, Error> {
    let mut fields = ImageFormFields::default();
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "image" => {
                let content_type = field.content_type().map(|mime| mime.essence_str().to_owned());
                let bytes = read_field(&mut field, SYMPTOM_IMAGE_MAX_BYTES)
                    .await?
                    .ok_or_else(|| {
                        symptom_error(&SymptomValidationError::ImageTooLarge {
                            max: SYMPTOM_IMAGE_MAX_BYTES,
                        })
                    })?;
                fields.image = Some((bytes, content_type));
            }
            "symptoms" => fields.symptoms = Some(read_text(&mut field, "symptoms").await?),
            "latitude" => {
                let raw = read_text(&mut field, "latitude").await?;
                fields.latitude = parse_coordinate(&raw, SymptomValidationError::InvalidLatitude)?;
            }
            "longitude" => {
                let raw = read_text(&mut field, "longitude").await?;
                fields.longitude =
                    parse_coordinate(&raw, SymptomValidationError::InvalidLongitude)?;
            }
            _ => {}
        }
    }
    Ok(fields)
}
