//! Structured analysis returned by the generative model, plus hospital
//! enrichment.
//!
//! The model is prompted for a fixed JSON shape but its output is not fully
//! trusted: scores and next steps are kept as raw JSON values and unknown top
//! level fields survive a re-serialise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Disclaimer used when the model omits one.
pub const DEFAULT_DISCLAIMER: &str = "This is for informational purposes only and not a substitute for professional medical advice. Please consult a healthcare provider.";

/// One candidate condition suggested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub condition: String,
    /// Usually a percentage string such as `"75%"`.
    #[serde(default)]
    pub confidence_score: Value,
}

/// Hospital or clinic near the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub address: String,
    pub distance_meters: u64,
}

/// Outcome of the nearby-hospital lookup embedded in an analysis.
///
/// Lookup failures do not fail the request; they serialise as
/// `{"error": "..."}` in place of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HospitalLookup {
    Found(Vec<Hospital>),
    Failed { error: String },
}

impl HospitalLookup {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}

/// Analysis payload returned to clients and recorded in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    #[serde(default)]
    pub possible_conditions: Vec<Condition>,
    #[serde(default)]
    pub recommended_next_steps: Value,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_hospitals: Option<HospitalLookup>,
    /// Extra fields produced by the model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_disclaimer() -> String {
    DEFAULT_DISCLAIMER.to_owned()
}

impl SymptomAnalysis {
    /// Attach the hospital lookup result.
    #[must_use]
    pub fn with_hospitals(mut self, lookup: HospitalLookup) -> Self {
        self.nearby_hospitals = Some(lookup);
        self
    }

    /// JSON form stored in the history table.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preserves_unknown_fields() {
        let raw = json!({
            "possible_conditions": [{"condition": "Migraine", "confidence_score": "70%"}],
            "recommended_next_steps": "Rest in a dark room.",
            "disclaimer": "Not medical advice.",
            "severity": "mild"
        });
        let analysis: SymptomAnalysis = serde_json::from_value(raw.clone()).expect("analysis");
        assert_eq!(analysis.possible_conditions.len(), 1);
        assert_eq!(analysis.extra.get("severity"), Some(&json!("mild")));
        assert_eq!(analysis.to_json(), raw);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let analysis: SymptomAnalysis = serde_json::from_value(json!({})).expect("analysis");
        assert!(analysis.possible_conditions.is_empty());
        assert_eq!(analysis.disclaimer, DEFAULT_DISCLAIMER);
        assert!(analysis.nearby_hospitals.is_none());
    }

    #[test]
    fn hospitals_serialise_as_list() {
        let analysis: SymptomAnalysis = serde_json::from_value(json!({})).expect("analysis");
        let enriched = analysis.with_hospitals(HospitalLookup::Found(vec![Hospital {
            name: "St Mary's".to_owned(),
            address: "Praed St".to_owned(),
            distance_meters: 420,
        }]));
        assert_eq!(
            enriched.to_json()["nearby_hospitals"],
            json!([{"name": "St Mary's", "address": "Praed St", "distance_meters": 420}])
        );
    }

    #[test]
    fn failed_lookup_serialises_inline_error() {
        let analysis: SymptomAnalysis = serde_json::from_value(json!({})).expect("analysis");
        let enriched = analysis.with_hospitals(HospitalLookup::failed("places unavailable"));
        assert_eq!(
            enriched.to_json()["nearby_hospitals"],
            json!({"error": "places unavailable"})
        );
    }

    #[test]
    fn stored_lookup_round_trips_through_history_json() {
        let stored = json!({"nearby_hospitals": {"error": "boom"}});
        let analysis: SymptomAnalysis = serde_json::from_value(stored).expect("analysis");
        assert_eq!(analysis.nearby_hospitals, Some(HospitalLookup::failed("boom")));
    }
}
