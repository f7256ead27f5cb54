//! Query history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::analysis::SymptomAnalysis;
use super::symptoms::SymptomText;
use super::user::UserId;

/// A stored symptom check as returned by `GET /history`.
///
/// `response_data` is kept as raw JSON: rows written by older clients may not
/// match the current analysis shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub user_id: UserId,
    pub symptom_text: String,
    pub response_data: Value,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// History row to insert after a completed analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub user_id: UserId,
    pub symptom_text: SymptomText,
    pub response_data: Value,
    pub image_url: Option<String>,
}

impl NewHistoryEntry {
    pub fn new(
        user_id: UserId,
        symptom_text: SymptomText,
        analysis: &SymptomAnalysis,
        image_url: Option<String>,
    ) -> Self {
        Self {
            user_id,
            symptom_text,
            response_data: analysis.to_json(),
            image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialises_store_row() {
        let row = json!({
            "id": 7,
            "user_id": 3,
            "symptom_text": "cough",
            "response_data": {"disclaimer": "x"},
            "image_url": null,
            "created_at": "2024-05-01T10:00:00+00:00"
        });
        let entry: HistoryEntry = serde_json::from_value(row).expect("history row");
        assert_eq!(entry.user_id.get(), 3);
        assert!(entry.image_url.is_none());
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn new_entry_embeds_analysis_json() {
        let analysis: SymptomAnalysis =
            serde_json::from_value(json!({"disclaimer": "d"})).expect("analysis");
        let entry = NewHistoryEntry::new(
            UserId::new(1).expect("id"),
            SymptomText::new("fever").expect("text"),
            &analysis,
            Some("https://img".to_owned()),
        );
        assert_eq!(entry.response_data["disclaimer"], json!("d"));
    }
}
