//! Reqwest-backed Gemini symptom analyser.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode, Url};

use super::dto::{GenerateRequestDto, GenerateResponseDto, InlineDataDto, PartDto};
use super::prompt::{clean_model_text, image_prompt, text_prompt};
use crate::domain::ports::{SymptomAnalyzer, SymptomAnalyzerError};
use crate::domain::{SymptomAnalysis, SymptomImage, SymptomText};
use crate::outbound::http_support::{AdapterBuildError, body_preview, build_client, join_endpoint};

/// Public Generative Language API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Symptom analyser backed by Gemini `generateContent`.
pub struct GeminiSymptomAnalyzer {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiSymptomAnalyzer {
    /// Build an analyser for `model` under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or the endpoint URL
    /// is invalid.
    pub fn new(
        base_url: &Url,
        model: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdapterBuildError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: join_endpoint(base_url, &format!("v1beta/models/{model}:generateContent"))?,
            api_key: api_key.into(),
        })
    }

    async fn generate(
        &self,
        request: &GenerateRequestDto,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_analysis(body.as_ref())
    }
}

#[async_trait]
impl SymptomAnalyzer for GeminiSymptomAnalyzer {
    async fn analyze_text(
        &self,
        symptoms: &SymptomText,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError> {
        let request = GenerateRequestDto::new(vec![PartDto::Text {
            text: text_prompt(symptoms),
        }]);
        self.generate(&request).await
    }

    async fn analyze_image(
        &self,
        symptoms: &SymptomText,
        image: &SymptomImage,
    ) -> Result<SymptomAnalysis, SymptomAnalyzerError> {
        let request = GenerateRequestDto::new(vec![
            PartDto::Text {
                text: image_prompt(symptoms),
            },
            PartDto::InlineData {
                inline_data: InlineDataDto {
                    mime_type: image.content_type().to_owned(),
                    data: STANDARD.encode(image.bytes()),
                },
            },
        ]);
        self.generate(&request).await
    }
}

fn parse_analysis(body: &[u8]) -> Result<SymptomAnalysis, SymptomAnalyzerError> {
    let decoded: GenerateResponseDto = serde_json::from_slice(body).map_err(|error| {
        SymptomAnalyzerError::decode(format!("invalid Gemini JSON payload: {error}"))
    })?;
    let text = decoded
        .into_text()
        .map_err(SymptomAnalyzerError::empty_response)?;
    let cleaned = clean_model_text(&text);
    serde_json::from_str(&cleaned).map_err(|error| {
        SymptomAnalyzerError::decode(format!("model output is not the expected JSON: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> SymptomAnalyzerError {
    if error.is_timeout() {
        SymptomAnalyzerError::timeout(error.to_string())
    } else {
        SymptomAnalyzerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SymptomAnalyzerError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SymptomAnalyzerError::timeout(format!("status {}", status.as_u16()))
        }
        _ => SymptomAnalyzerError::rejected(status.as_u16(), body_preview(body)),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network Gemini helpers.

    use super::*;
    use serde_json::json;

    fn response_with_text(text: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]
        }))
        .expect("json")
    }

    #[test]
    fn parses_fenced_model_output() {
        let body = response_with_text(
            "```json\n{\"possible_conditions\":[{\"condition\":\"Flu\",\"confidence_score\":\"80%\"}],\
             \"recommended_next_steps\":\"Rest\",\"disclaimer\":\"d\"}\n```",
        );
        let analysis = parse_analysis(&body).expect("analysis");
        assert_eq!(analysis.possible_conditions[0].condition, "Flu");
        assert_eq!(analysis.disclaimer, "d");
    }

    #[test]
    fn prose_output_is_a_decode_error() {
        let body = response_with_text("I think you have a cold.");
        assert!(matches!(
            parse_analysis(&body),
            Err(SymptomAnalyzerError::Decode { .. })
        ));
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let body = serde_json::to_vec(&json!({"candidates": []})).expect("json");
        assert!(matches!(
            parse_analysis(&body),
            Err(SymptomAnalyzerError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn maps_rejections_with_status() {
        let error = map_status_error(StatusCode::FORBIDDEN, b"{\"error\":{\"message\":\"API key not valid\"}}");
        assert!(matches!(
            error,
            SymptomAnalyzerError::Rejected { status: 403, ref message } if message.contains("API key not valid")
        ));
    }

    #[test]
    fn builds_model_endpoint() {
        let base = Url::parse(DEFAULT_GEMINI_BASE_URL).expect("url");
        let analyzer = GeminiSymptomAnalyzer::new(
            &base,
            DEFAULT_GEMINI_MODEL,
            "key",
            Duration::from_secs(60),
        )
        .expect("analyzer");
        assert_eq!(
            analyzer.endpoint.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
