//! Classification verdict produced by the detection stage.

use serde::{Deserialize, Serialize};

/// Verdict for a single inbound message.
///
/// Deserialized from model output, so every field beyond the verdict itself
/// is optional and defaults leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether the message is judged to be a scam attempt
    pub is_scam: bool,
    /// Model confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,
    /// Scam category, when the model names one (e.g. "phishing", "lottery")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scam_type: Option<String>,
    /// Free-text justification for the verdict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Indicator categories the model matched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators_found: Vec<String>,
}

impl DetectionResult {
    /// Fail-closed verdict used when detection cannot complete in time.
    ///
    /// Missing a scam is worse than a false positive here, so an unanswered
    /// classification is treated as a scam at reduced confidence.
    pub fn assumed_scam() -> Self {
        Self {
            is_scam: true,
            confidence: 0.8,
            scam_type: None,
            reasoning: Some("detection unavailable, failing closed".to_string()),
            indicators_found: Vec::new(),
        }
    }

    /// Short operator-facing note summarizing the verdict, if there is
    /// anything to say.
    pub fn note(&self) -> Option<String> {
        match (&self.scam_type, &self.reasoning) {
            (Some(t), Some(r)) => Some(format!("{}: {}", t, r)),
            (Some(t), None) => Some(t.clone()),
            (None, Some(r)) => Some(r.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assumed_scam_fails_closed() {
        let verdict = DetectionResult::assumed_scam();
        assert!(verdict.is_scam);
        assert_eq!(verdict.confidence, 0.8);
    }

    #[test]
    fn round_trip_with_all_fields() {
        let verdict = DetectionResult {
            is_scam: true,
            confidence: 0.95,
            scam_type: Some("phishing".to_string()),
            reasoning: Some("credential request with urgency".to_string()),
            indicators_found: vec!["urgency".to_string(), "credential_request".to_string()],
        };

        let json = serde_json::to_string(&verdict).unwrap();
        let back: DetectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, verdict);
    }

    #[test]
    fn round_trip_with_absent_optionals() {
        let verdict = DetectionResult {
            is_scam: false,
            confidence: 0.1,
            scam_type: None,
            reasoning: None,
            indicators_found: Vec::new(),
        };

        let json = serde_json::to_string(&verdict).unwrap();
        assert!(!json.contains("scam_type"));
        assert!(!json.contains("indicators_found"));

        let back: DetectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, verdict);
    }

    #[test]
    fn minimal_model_output_parses() {
        let verdict: DetectionResult =
            serde_json::from_str(r#"{"is_scam": true, "confidence": 0.9}"#).unwrap();
        assert!(verdict.is_scam);
        assert!(verdict.scam_type.is_none());
        assert!(verdict.indicators_found.is_empty());
    }

    #[test]
    fn note_combines_type_and_reasoning() {
        let verdict = DetectionResult {
            is_scam: true,
            confidence: 0.9,
            scam_type: Some("phishing".to_string()),
            reasoning: Some("fake bank link".to_string()),
            indicators_found: Vec::new(),
        };
        assert_eq!(verdict.note().unwrap(), "phishing: fake bank link");

        let bare = DetectionResult {
            is_scam: false,
            confidence: 0.2,
            scam_type: None,
            reasoning: None,
            indicators_found: Vec::new(),
        };
        assert!(bare.note().is_none());
    }
}
