//! Prompt text and response cleaning for symptom analysis.

use crate::domain::SymptomText;

const RESPONSE_SHAPE: &str = r#"{
  "possible_conditions": [
    {
      "condition": "Name of the condition",
      "confidence_score": "A percentage indicating your confidence (e.g., '75%')."
    }
  ],
  "recommended_next_steps": "Provide a few clear, actionable next steps for the user.",
  "disclaimer": "This is for informational purposes only and not a substitute for professional medical advice. Please consult a healthcare provider."
}"#;

const CLOSING_INSTRUCTION: &str =
    "Only return the raw JSON object. Do not include any other text or markdown formatting like ```json.";

/// Prompt for a text-only analysis.
pub(super) fn text_prompt(symptoms: &SymptomText) -> String {
    format!(
        "Analyze the following symptoms and provide a probable medical condition analysis.\n\
         The user's symptoms are: \"{symptoms}\".\n\n\
         Based on these symptoms, please return a JSON object with the following structure:\n\
         {RESPONSE_SHAPE}\n\n{CLOSING_INSTRUCTION}"
    )
}

/// Prompt accompanying an image.
pub(super) fn image_prompt(symptoms: &SymptomText) -> String {
    format!(
        "Analyze the following symptoms and the attached image to provide a probable medical condition analysis.\n\
         The user's symptoms are: \"{symptoms}\".\n\n\
         Based on the text and the image, please return a JSON object with the following structure:\n\
         {RESPONSE_SHAPE}\n\n{CLOSING_INSTRUCTION}"
    )
}

/// Strip surrounding whitespace and markdown code fences from model output.
pub(super) fn clean_model_text(raw: &str) -> String {
    raw.trim().replace("```json", "").replace("```", "").trim().to_owned()
}
