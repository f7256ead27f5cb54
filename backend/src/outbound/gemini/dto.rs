//! Request and response DTOs for `generateContent`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateRequestDto {
    pub(super) contents: Vec<ContentDto>,
    pub(super) generation_config: GenerationConfigDto,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto {
    pub(super) role: &'static str,
    pub(super) parts: Vec<PartDto>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum PartDto {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataDto,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InlineDataDto {
    pub(super) mime_type: String,
    pub(super) data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfigDto {
    pub(super) response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
    #[serde(default)]
    pub(super) prompt_feedback: Option<PromptFeedbackDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CandidateDto {
    #[serde(default)]
    pub(super) content: Option<CandidateContentDto>,
    #[serde(default)]
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContentDto {
    #[serde(default)]
    pub(super) parts: Vec<ResponsePartDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsePartDto {
    #[serde(default)]
    pub(super) text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PromptFeedbackDto {
    #[serde(default)]
    pub(super) block_reason: Option<String>,
}

impl GenerateRequestDto {
    pub(super) fn new(parts: Vec<PartDto>) -> Self {
        Self {
            contents: vec![ContentDto {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfigDto {
                response_mime_type: "application/json",
            },
        }
    }
}

impl GenerateResponseDto {
    /// Concatenated text of the first candidate, or a reason for its absence.
    pub(super) fn into_text(self) -> Result<String, String> {
        let block_reason = self.prompt_feedback.and_then(|feedback| feedback.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => format!("prompt blocked: {reason}"),
                None => "no candidates returned".to_owned(),
            });
        };
        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.trim().is_empty() {
            return Err(format!(
                "candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ));
        }
        Ok(text)
    }
}
