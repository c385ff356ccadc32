//! Detection stage - classifies the latest message.

use std::sync::Arc;
use std::time::Duration;

use crate::application::gateway::ModelGateway;
use crate::application::{json_recovery, prompts};
use crate::domain::{DetectionResult, Message};

use super::StageOutcome;

/// Low-moderate temperature: classification should be near-deterministic.
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 1024;

/// Classification stage.
pub struct DetectionStage {
    gateway: Arc<ModelGateway>,
    budget: Duration,
}

impl DetectionStage {
    pub fn new(gateway: Arc<ModelGateway>, budget: Duration) -> Self {
        Self { gateway, budget }
    }

    /// Classifies `message` in the context of `history`.
    ///
    /// Timeouts and failures propagate; the fallback verdict is the
    /// orchestrator's call.
    pub async fn run(&self, message: &Message, history: &[Message]) -> StageOutcome<DetectionResult> {
        let prompt = prompts::detection_prompt(message, history);

        let raw = match self
            .gateway
            .complete(&prompt, TEMPERATURE, MAX_TOKENS, self.budget)
            .await
        {
            Ok(raw) => raw,
            Err(err) => return StageOutcome::from_gateway_error(err),
        };

        match json_recovery::parse_into::<DetectionResult>(&raw) {
            Ok(verdict) => StageOutcome::Completed(verdict),
            Err(err) => StageOutcome::Failed(err.to_string()),
        }
    }
}
