//! HTTP DTOs for the scam-detection endpoint.
//!
//! The inbound schema is validated once here; the orchestrator only ever
//! sees fully-normalized domain values. Wire names are camelCase with
//! snake_case aliases tolerated; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::application::PipelineVerdict;
use crate::domain::{EngagementMetrics, ExtractedIntelligence, Message, Metadata, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Inbound request body for `POST /api/scam-detection`
#[derive(Debug, Clone, Deserialize)]
pub struct ScamDetectionRequest {
    pub message: MessageDto,
    #[serde(
        default,
        rename = "conversationHistory",
        alias = "conversation_history"
    )]
    pub conversation_history: Vec<MessageDto>,
    #[serde(default)]
    pub metadata: Option<MetadataDto>,
}

/// A message on the wire. `timestamp` is optional and defaults to the time
/// the request is processed.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub sender: String,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl MessageDto {
    fn into_domain(self) -> Message {
        Message {
            sender: self.sender,
            text: self.text,
            timestamp: self.timestamp.unwrap_or_else(Timestamp::now),
        }
    }
}

/// Advisory metadata on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataDto {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl ScamDetectionRequest {
    /// Normalizes the request into domain values.
    pub fn into_domain(self) -> (Message, Vec<Message>, Metadata) {
        let message = self.message.into_domain();
        let history = self
            .conversation_history
            .into_iter()
            .map(MessageDto::into_domain)
            .collect();
        let metadata = self
            .metadata
            .map(|m| Metadata {
                channel: m.channel,
                language: m.language,
                locale: m.locale,
            })
            .unwrap_or_default();
        (message, history, metadata)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Success response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamDetectionResponse {
    pub status: String,
    pub scam_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_metrics: Option<EngagementMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_intelligence: Option<ExtractedIntelligence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_notes: Option<String>,
}

impl From<PipelineVerdict> for ScamDetectionResponse {
    fn from(verdict: PipelineVerdict) -> Self {
        Self {
            status: "success".to_string(),
            scam_detected: verdict.scam_detected,
            agent_response: verdict.agent_response,
            engagement_metrics: verdict.engagement_metrics,
            extracted_intelligence: verdict.extracted_intelligence,
            agent_notes: verdict.agent_notes,
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_request() -> Self {
        Self::new("Invalid request format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_deserializes() {
        let json = r#"{"message": {"sender": "scammer", "text": "send OTP"}}"#;
        let req: ScamDetectionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.message.sender, "scammer");
        assert!(req.conversation_history.is_empty());
        assert!(req.metadata.is_none());
    }

    #[test]
    fn full_request_deserializes() {
        let json = r#"{
            "message": {"sender": "scammer", "text": "send OTP", "timestamp": "2026-08-06T10:00:00Z"},
            "conversationHistory": [{"sender": "user", "text": "who?", "timestamp": 1754476200}],
            "metadata": {"channel": "SMS", "language": "Hindi"}
        }"#;
        let req: ScamDetectionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.conversation_history.len(), 1);
        assert_eq!(req.metadata.unwrap().channel.as_deref(), Some("SMS"));
    }

    #[test]
    fn snake_case_history_alias_is_tolerated() {
        let json = r#"{
            "message": {"sender": "s", "text": "t"},
            "conversation_history": [{"sender": "u", "text": "x"}]
        }"#;
        let req: ScamDetectionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.conversation_history.len(), 1);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"message": {"sender": "s", "text": "t", "priority": 5}, "extra": true}"#;
        let req: ScamDetectionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message.text, "t");
    }

    #[test]
    fn missing_message_text_is_rejected() {
        let json = r#"{"message": {"sender": "scammer"}}"#;
        assert!(serde_json::from_str::<ScamDetectionRequest>(json).is_err());
    }

    #[test]
    fn into_domain_defaults_timestamp_and_metadata() {
        let json = r#"{"message": {"sender": "s", "text": "t"}}"#;
        let req: ScamDetectionRequest = serde_json::from_str(json).unwrap();
        let (message, history, metadata) = req.into_domain();

        assert!(matches!(message.timestamp, Timestamp::Text(_)));
        assert!(history.is_empty());
        assert_eq!(metadata.language(), "English");
    }

    #[test]
    fn response_omits_absent_sections() {
        let response = ScamDetectionResponse {
            status: "success".to_string(),
            scam_detected: false,
            agent_response: Some("Thank you for your message.".to_string()),
            engagement_metrics: None,
            extracted_intelligence: None,
            agent_notes: None,
        };
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"scamDetected\":false"));
        assert!(!json.contains("engagementMetrics"));
        assert!(!json.contains("extractedIntelligence"));
        assert!(!json.contains("agentNotes"));
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ErrorBody::invalid_request()).unwrap();
        assert_eq!(
            json,
            r#"{"status":"error","message":"Invalid request format"}"#
        );
    }
}
