//! Symptom submission value types: free text, location and uploaded image.

use std::fmt;

/// Maximum accepted symptom description length in characters.
pub const SYMPTOM_TEXT_MAX: usize = 4000;
/// Maximum accepted image size in bytes.
pub const SYMPTOM_IMAGE_MAX_BYTES: usize = 10 * 1024 * 1024;
/// Symptom text recorded when an image arrives without a description.
pub const DEFAULT_IMAGE_SYMPTOMS: &str = "No additional text symptoms provided.";
/// Content type assumed when an uploaded part does not declare one.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Validation errors for symptom submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymptomValidationError {
    #[error("symptoms must not be empty")]
    EmptySymptoms,
    #[error("symptoms must be at most {max} characters")]
    SymptomsTooLong { max: usize },
    #[error("latitude must be a finite number between -90 and 90")]
    InvalidLatitude,
    #[error("longitude must be a finite number between -180 and 180")]
    InvalidLongitude,
    #[error("image must not be empty")]
    EmptyImage,
    #[error("image must be at most {max} bytes")]
    ImageTooLarge { max: usize },
    #[error("content type {content_type} is not an image")]
    NotAnImage { content_type: String },
}

impl SymptomValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptySymptoms | Self::SymptomsTooLong { .. } => "symptoms",
            Self::InvalidLatitude => "latitude",
            Self::InvalidLongitude => "longitude",
            Self::EmptyImage | Self::ImageTooLarge { .. } | Self::NotAnImage { .. } => "image",
        }
    }
}

/// Trimmed, non-empty symptom description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomText(String);

impl SymptomText {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SymptomValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SymptomValidationError::EmptySymptoms);
        }
        if trimmed.chars().count() > SYMPTOM_TEXT_MAX {
            return Err(SymptomValidationError::SymptomsTooLong {
                max: SYMPTOM_TEXT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Text accompanying an image upload; blank or missing input falls back to
    /// [`DEFAULT_IMAGE_SYMPTOMS`].
    pub fn for_image(raw: Option<&str>) -> Result<Self, SymptomValidationError> {
        match raw.map(str::trim).filter(|text| !text.is_empty()) {
            Some(text) => Self::new(text),
            None => Ok(Self(DEFAULT_IMAGE_SYMPTOMS.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SymptomText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SymptomText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS84 position used to search for nearby hospitals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SymptomValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SymptomValidationError::InvalidLatitude);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SymptomValidationError::InvalidLongitude);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build coordinates only when both halves are supplied.
    ///
    /// A lone latitude or longitude is ignored rather than rejected.
    ///
    /// # Examples
    /// ```
    /// use symptom_checker::domain::Coordinates;
    ///
    /// assert!(Coordinates::from_optional(Some(51.5), None).unwrap().is_none());
    /// assert!(Coordinates::from_optional(Some(51.5), Some(-0.1)).unwrap().is_some());
    /// ```
    pub fn from_optional(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, SymptomValidationError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Uploaded symptom photo.
#[derive(Clone, PartialEq, Eq)]
pub struct SymptomImage {
    bytes: Vec<u8>,
    content_type: String,
}

impl SymptomImage {
    /// Validate an uploaded image.
    ///
    /// A missing content type defaults to [`DEFAULT_IMAGE_CONTENT_TYPE`].
    pub fn new(
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<Self, SymptomValidationError> {
        if bytes.is_empty() {
            return Err(SymptomValidationError::EmptyImage);
        }
        if bytes.len() > SYMPTOM_IMAGE_MAX_BYTES {
            return Err(SymptomValidationError::ImageTooLarge {
                max: SYMPTOM_IMAGE_MAX_BYTES,
            });
        }
        let content_type = content_type
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(SymptomValidationError::NotAnImage { content_type });
        }
        Ok(Self {
            bytes,
            content_type,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File extension used for the stored object.
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/heic" => "heic",
            _ => "jpg",
        }
    }
}

impl fmt::Debug for SymptomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymptomImage")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}
