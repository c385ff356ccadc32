//! Request orchestrator - sequences the pipeline and owns every fallback.
//!
//! The defining rule: a request is never left unanswered. Every stage
//! outcome, including the outer budget elapsing, resolves to a
//! conversationally plausible verdict, so the caller sees an error status
//! only for auth and request-shape violations handled at the HTTP layer.
//!
//! Stage order within a request is strict: detect, then engage, then
//! extract - extraction reads the agent reply, so it can never run first.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::application::gateway::ModelGateway;
use crate::application::prompts;
use crate::application::stages::{
    DetectionStage, EngagementStage, ExtractionStage, StageOutcome,
};
use crate::config::PipelineConfig;
use crate::domain::{
    DetectionResult, EngagementMetrics, ExtractedIntelligence, Message, Metadata, Session,
    SessionId,
};
use crate::ports::{SessionStore, TranscriptIndex, TranscriptMetadata, TranscriptRecord};

/// Neutral acknowledgement for messages judged legitimate.
const NEUTRAL_REPLY: &str = "Thank you for your message.";
/// Substitute reply when engagement cannot produce one.
const CLARIFY_FALLBACK: &str =
    "I'm not sure I understand. Can you please explain more clearly?";
/// Substitute reply when the whole request budget elapses.
const APOLOGY_FALLBACK: &str = "Sorry, I didn't catch that. Could you repeat?";

/// Terminal result of the pipeline; maps 1:1 onto the success response body.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineVerdict {
    pub scam_detected: bool,
    pub agent_response: Option<String>,
    pub engagement_metrics: Option<EngagementMetrics>,
    pub extracted_intelligence: Option<ExtractedIntelligence>,
    pub agent_notes: Option<String>,
}

impl PipelineVerdict {
    /// Verdict for a message judged legitimate.
    fn not_scam() -> Self {
        Self {
            scam_detected: false,
            agent_response: Some(NEUTRAL_REPLY.to_string()),
            engagement_metrics: None,
            extracted_intelligence: None,
            agent_notes: None,
        }
    }

    /// Verdict when the outer budget elapsed. Fails closed on the scam flag,
    /// since detection may never have finished.
    fn apology() -> Self {
        Self {
            scam_detected: true,
            agent_response: Some(APOLOGY_FALLBACK.to_string()),
            engagement_metrics: None,
            extracted_intelligence: None,
            agent_notes: None,
        }
    }
}

/// The scam-detection request pipeline.
pub struct ScamPipeline {
    detection: DetectionStage,
    engagement: EngagementStage,
    extraction: ExtractionStage,
    sessions: Arc<dyn SessionStore>,
    index: Arc<dyn TranscriptIndex>,
    request_budget: Duration,
    extraction_threshold: u32,
}

impl ScamPipeline {
    /// Wires the pipeline from its collaborators and timeout configuration.
    pub fn new(
        gateway: Arc<ModelGateway>,
        sessions: Arc<dyn SessionStore>,
        index: Arc<dyn TranscriptIndex>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            detection: DetectionStage::new(gateway.clone(), config.detection_timeout()),
            engagement: EngagementStage::new(gateway.clone(), config.engagement_timeout()),
            extraction: ExtractionStage::new(gateway, config.extraction_timeout()),
            sessions,
            index,
            request_budget: config.request_timeout(),
            extraction_threshold: config.extraction_turn_threshold,
        }
    }

    /// Handles one inbound message. Infallible by construction: every path,
    /// including the outer timeout, resolves to a verdict.
    pub async fn handle(
        &self,
        message: Message,
        history: Vec<Message>,
        metadata: Metadata,
    ) -> PipelineVerdict {
        match timeout(self.request_budget, self.run(&message, &history, &metadata)).await {
            Ok(verdict) => verdict,
            Err(_) => {
                tracing::warn!(
                    budget_secs = self.request_budget.as_secs(),
                    "request budget elapsed, answering with apology fallback"
                );
                PipelineVerdict::apology()
            }
        }
    }

    async fn run(
        &self,
        message: &Message,
        history: &[Message],
        metadata: &Metadata,
    ) -> PipelineVerdict {
        // DETECTING
        let verdict = match self.detection.run(message, history).await {
            StageOutcome::Completed(verdict) => verdict,
            StageOutcome::TimedOut => {
                tracing::warn!("detection timed out, assuming scam at reduced confidence");
                DetectionResult::assumed_scam()
            }
            StageOutcome::Failed(reason) => {
                tracing::warn!(%reason, "detection failed, assuming scam at reduced confidence");
                DetectionResult::assumed_scam()
            }
        };

        if !verdict.is_scam {
            tracing::info!(confidence = verdict.confidence, "message judged legitimate");
            return PipelineVerdict::not_scam();
        }

        // SESSION_LOOKUP
        let session_id = SessionId::derive(&message.sender, &message.timestamp);
        let mut session = self.load_or_init_session(&session_id).await;

        // ENGAGING
        let reply = match self
            .engagement
            .run(&message.text, history, metadata)
            .await
        {
            StageOutcome::Completed(reply) => reply,
            StageOutcome::TimedOut => {
                tracing::warn!(session = %session_id, "engagement timed out, using clarifying fallback");
                CLARIFY_FALLBACK.to_string()
            }
            StageOutcome::Failed(reason) => {
                tracing::warn!(session = %session_id, %reason, "engagement failed, using clarifying fallback");
                CLARIFY_FALLBACK.to_string()
            }
        };

        session.record_turn();

        // EXTRACTING (only once the conversation is long enough to be worth it)
        let mut intelligence: Option<ExtractedIntelligence> = None;
        if session.turn_count >= self.extraction_threshold {
            let transcript = prompts::render_transcript(history, message, &reply);
            match self.extraction.run(&transcript).await {
                StageOutcome::Completed(extracted) => {
                    session.intelligence_extracted = true;
                    self.persist_transcript(&session_id, &transcript, message, &verdict, metadata)
                        .await;
                    intelligence = Some(extracted);
                }
                StageOutcome::TimedOut => {
                    tracing::warn!(session = %session_id, "extraction timed out, omitting intelligence");
                }
                StageOutcome::Failed(reason) => {
                    tracing::warn!(session = %session_id, %reason, "extraction failed, omitting intelligence");
                }
            }
        }

        // RESPONDING
        let turn_count = session.turn_count;
        if let Err(err) = self.sessions.save(&session_id, session).await {
            tracing::warn!(session = %session_id, %err, "session save failed, continuing");
        }

        PipelineVerdict {
            scam_detected: true,
            agent_response: Some(reply),
            engagement_metrics: Some(EngagementMetrics::from_turn_count(turn_count)),
            extracted_intelligence: intelligence,
            agent_notes: verdict.note(),
        }
    }

    /// Loads the session, initializing it on first contact. Store failures
    /// degrade to a throwaway in-request session rather than failing the
    /// request.
    async fn load_or_init_session(&self, id: &SessionId) -> Session {
        match self.sessions.load(id).await {
            Ok(Some(session)) => session,
            Ok(None) => match self.sessions.init(id).await {
                Ok(session) => session,
                Err(err) => {
                    tracing::warn!(session = %id, %err, "session init failed, using transient state");
                    Session::new()
                }
            },
            Err(err) => {
                tracing::warn!(session = %id, %err, "session load failed, using transient state");
                Session::new()
            }
        }
    }

    /// Writes the completed transcript to the similarity index. Write-only:
    /// search results are never consulted here, and failures are non-fatal.
    async fn persist_transcript(
        &self,
        session_id: &SessionId,
        transcript: &str,
        message: &Message,
        verdict: &DetectionResult,
        metadata: &Metadata,
    ) {
        let record = TranscriptRecord {
            id: session_id.to_string(),
            text: transcript.to_string(),
            metadata: TranscriptMetadata {
                sender: message.sender.clone(),
                scam_type: verdict.scam_type.clone(),
                channel: metadata.channel.clone(),
            },
        };
        if let Err(err) = self.index.store(record).await {
            tracing::warn!(session = %session_id, %err, "transcript store failed, continuing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::index::InMemoryTranscriptIndex;
    use crate::adapters::session::InMemorySessionStore;
    use crate::domain::Timestamp;

    const SCAM_JSON: &str =
        r#"{"is_scam": true, "confidence": 0.95, "scam_type": "phishing", "reasoning": "OTP request"}"#;
    const NOT_SCAM_JSON: &str = r#"{"is_scam": false, "confidence": 0.1}"#;
    const INTEL_JSON: &str = r#"{"upiIds": ["fraud@upi"]}"#;

    fn fast_config() -> PipelineConfig {
        PipelineConfig {
            detection_timeout_secs: 1,
            engagement_timeout_secs: 1,
            extraction_timeout_secs: 1,
            request_timeout_secs: 3,
            extraction_turn_threshold: 2,
        }
    }

    fn pipeline_with(provider: MockAiProvider, config: &PipelineConfig) -> ScamPipeline {
        ScamPipeline::new(
            Arc::new(ModelGateway::new(Arc::new(provider))),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryTranscriptIndex::new()),
            config,
        )
    }

    fn scam_message() -> Message {
        Message {
            sender: "+911234567890".to_string(),
            text: "Your account will be blocked, send OTP now".to_string(),
            timestamp: Timestamp::Text("2026-08-06T10:00:00Z".to_string()),
        }
    }

    #[tokio::test]
    async fn non_scam_message_gets_neutral_reply() {
        let provider = MockAiProvider::new().with_response(NOT_SCAM_JSON);
        let pipeline = pipeline_with(provider, &fast_config());

        let verdict = pipeline
            .handle(
                Message::new("friend", "Hey, are we still meeting for lunch?"),
                Vec::new(),
                Metadata::default(),
            )
            .await;

        assert!(!verdict.scam_detected);
        assert_eq!(verdict.agent_response.as_deref(), Some(NEUTRAL_REPLY));
        assert!(verdict.extracted_intelligence.is_none());
        assert!(verdict.engagement_metrics.is_none());
    }

    #[tokio::test]
    async fn scam_message_gets_persona_reply_and_metrics() {
        let provider = MockAiProvider::new()
            .with_response(SCAM_JSON)
            .with_response("Oh dear, which bank is this? I am confused.");
        let pipeline = pipeline_with(provider, &fast_config());

        let verdict = pipeline
            .handle(scam_message(), Vec::new(), Metadata::default())
            .await;

        assert!(verdict.scam_detected);
        assert_eq!(
            verdict.agent_response.as_deref(),
            Some("Oh dear, which bank is this? I am confused.")
        );
        let metrics = verdict.engagement_metrics.unwrap();
        assert_eq!(metrics.total_messages_exchanged, 2);
        // First turn: below the threshold, no extraction yet
        assert!(verdict.extracted_intelligence.is_none());
        assert_eq!(
            verdict.agent_notes.as_deref(),
            Some("phishing: OTP request")
        );
    }

    #[tokio::test]
    async fn detection_failure_fails_closed() {
        let provider = MockAiProvider::new()
            .with_response("not json at all")
            .with_response("Hello? Who is this please?");
        let pipeline = pipeline_with(provider, &fast_config());

        let verdict = pipeline
            .handle(scam_message(), Vec::new(), Metadata::default())
            .await;

        // Unparsable detection is treated as a scam at reduced confidence
        assert!(verdict.scam_detected);
        assert_eq!(
            verdict.agent_response.as_deref(),
            Some("Hello? Who is this please?")
        );
    }

    #[tokio::test]
    async fn engagement_failure_substitutes_clarifying_question() {
        // Detection succeeds, engagement queue is empty so the mock errors
        let provider = MockAiProvider::new().with_response(SCAM_JSON);
        let pipeline = pipeline_with(provider, &fast_config());

        let verdict = pipeline
            .handle(scam_message(), Vec::new(), Metadata::default())
            .await;

        assert!(verdict.scam_detected);
        assert_eq!(verdict.agent_response.as_deref(), Some(CLARIFY_FALLBACK));
    }

    #[tokio::test]
    async fn second_turn_triggers_extraction() {
        let provider = MockAiProvider::new()
            // turn 1
            .with_response(SCAM_JSON)
            .with_response("Which bank did you say?")
            // turn 2
            .with_response(SCAM_JSON)
            .with_response("My UPI? I do not know how that works.")
            .with_response(INTEL_JSON);
        let sessions = Arc::new(InMemorySessionStore::new());
        let index = Arc::new(InMemoryTranscriptIndex::new());
        let pipeline = ScamPipeline::new(
            Arc::new(ModelGateway::new(Arc::new(provider))),
            sessions.clone(),
            index.clone(),
            &fast_config(),
        );

        let first = pipeline
            .handle(scam_message(), Vec::new(), Metadata::default())
            .await;
        assert!(first.extracted_intelligence.is_none());

        let history = vec![scam_message()];
        let second = pipeline
            .handle(scam_message(), history, Metadata::default())
            .await;

        let intel = second.extracted_intelligence.unwrap();
        assert_eq!(intel.upi_ids, vec!["fraud@upi"]);

        // Session advanced 0 -> 1 -> 2 and was marked extracted
        let id = SessionId::derive("+911234567890", &scam_message().timestamp);
        let session = sessions.load(&id).await.unwrap().unwrap();
        assert_eq!(session.turn_count, 2);
        assert!(session.intelligence_extracted);

        // Transcript was persisted under the session id
        let hits = index.search("OTP", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.id, id.to_string());
    }

    #[tokio::test]
    async fn extraction_failure_omits_intelligence_but_succeeds() {
        let provider = MockAiProvider::new()
            .with_response(SCAM_JSON)
            .with_response("Which bank?")
            .with_response(SCAM_JSON)
            .with_response("I see.")
            .with_response("no json from me");
        let pipeline = pipeline_with(provider, &fast_config());

        pipeline
            .handle(scam_message(), Vec::new(), Metadata::default())
            .await;
        let second = pipeline
            .handle(scam_message(), vec![scam_message()], Metadata::default())
            .await;

        assert!(second.scam_detected);
        assert!(second.extracted_intelligence.is_none());
        assert_eq!(second.agent_response.as_deref(), Some("I see."));
    }

    #[tokio::test]
    async fn outer_timeout_answers_with_apology() {
        let provider = MockAiProvider::new()
            .with_response(SCAM_JSON)
            .with_delay(Duration::from_secs(60));
        let config = PipelineConfig {
            // Stage budget larger than the request budget: only the outer
            // bound can fire
            detection_timeout_secs: 30,
            engagement_timeout_secs: 1,
            extraction_timeout_secs: 1,
            request_timeout_secs: 1,
            extraction_turn_threshold: 2,
        };
        let pipeline = pipeline_with(provider, &config);

        let started = std::time::Instant::now();
        let verdict = pipeline
            .handle(scam_message(), Vec::new(), Metadata::default())
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(verdict.agent_response.as_deref(), Some(APOLOGY_FALLBACK));
        assert!(verdict.scam_detected);
    }
}
