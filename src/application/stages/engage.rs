//! Engagement stage - persona-driven reply generation.

use std::sync::Arc;
use std::time::Duration;

use crate::application::gateway::ModelGateway;
use crate::application::prompts;
use crate::domain::{Message, Metadata};

use super::StageOutcome;

/// High temperature: replies should vary and read naturally.
const TEMPERATURE: f32 = 0.85;
/// Tighter budget than detection; replies are 2-3 sentences.
const MAX_TOKENS: u32 = 512;

/// Persona reply stage.
pub struct EngagementStage {
    gateway: Arc<ModelGateway>,
    budget: Duration,
}

impl EngagementStage {
    pub fn new(gateway: Arc<ModelGateway>, budget: Duration) -> Self {
        Self { gateway, budget }
    }

    /// Generates the persona's reply to `scammer_message`.
    ///
    /// An empty reply counts as a failure: the caller must always have
    /// something to say.
    pub async fn run(
        &self,
        scammer_message: &str,
        history: &[Message],
        metadata: &Metadata,
    ) -> StageOutcome<String> {
        let prompt = prompts::engagement_prompt(scammer_message, history, metadata);

        let raw = match self
            .gateway
            .complete(&prompt, TEMPERATURE, MAX_TOKENS, self.budget)
            .await
        {
            Ok(raw) => raw,
            Err(err) => return StageOutcome::from_gateway_error(err),
        };

        let reply = raw.trim().to_string();
        if reply.is_empty() {
            return StageOutcome::Failed("model returned an empty reply".to_string());
        }
        StageOutcome::Completed(reply)
    }
}
