//! Intelligence extraction stage - structured pull of fraud indicators.

use std::sync::Arc;
use std::time::Duration;

use crate::application::gateway::ModelGateway;
use crate::application::{json_recovery, prompts};
use crate::domain::ExtractedIntelligence;

use super::StageOutcome;

/// Low temperature: extraction favors precision over creativity.
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 1024;

/// Extraction stage.
pub struct ExtractionStage {
    gateway: Arc<ModelGateway>,
    budget: Duration,
}

impl ExtractionStage {
    pub fn new(gateway: Arc<ModelGateway>, budget: Duration) -> Self {
        Self { gateway, budget }
    }

    /// Extracts indicator lists from a rendered transcript.
    ///
    /// List fields the model omits come back empty, never null.
    pub async fn run(&self, transcript: &str) -> StageOutcome<ExtractedIntelligence> {
        let prompt = prompts::extraction_prompt(transcript);

        let raw = match self
            .gateway
            .complete(&prompt, TEMPERATURE, MAX_TOKENS, self.budget)
            .await
        {
            Ok(raw) => raw,
            Err(err) => return StageOutcome::from_gateway_error(err),
        };

        match json_recovery::parse_into::<ExtractedIntelligence>(&raw) {
            Ok(intelligence) => StageOutcome::Completed(intelligence),
            Err(err) => StageOutcome::Failed(err.to_string()),
        }
    }
}
