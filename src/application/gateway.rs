//! Model Gateway - the boundary wrapper around LLM completion calls.
//!
//! The gateway owns everything the stages should not care about: the wall
//! clock budget for a call, the shared system instruction, and scrubbing of
//! markdown code fences the model wraps around JSON despite being told not
//! to. Failures collapse to two kinds - timed out, or failed upstream.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::ports::{AiProvider, CompletionRequest, ProviderError};

/// System instruction sent with every completion call.
const SYSTEM_INSTRUCTION: &str =
    "You are a helpful AI assistant. Always respond with valid JSON when requested.";

/// Gateway over the completion provider.
pub struct ModelGateway {
    provider: Arc<dyn AiProvider>,
}

impl ModelGateway {
    /// Creates a gateway over the given provider.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Runs one completion within `budget`, returning fence-stripped text.
    ///
    /// The in-flight provider call is dropped when the budget elapses; the
    /// network-side request may still run to completion, but its result is
    /// discarded.
    pub async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
        budget: Duration,
    ) -> Result<String, GatewayError> {
        let request = CompletionRequest::new(prompt)
            .with_system_prompt(SYSTEM_INSTRUCTION)
            .with_temperature(temperature)
            .with_max_tokens(max_tokens);

        let response = timeout(budget, self.provider.complete(request))
            .await
            .map_err(|_| GatewayError::Timeout(budget))??;

        Ok(strip_code_fences(&response.content).to_string())
    }
}

/// Gateway failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No response within the wall-clock budget.
    #[error("gateway timed out after {0:?}")]
    Timeout(Duration),

    /// Transport, auth or model-side failure.
    #[error("gateway call failed: {0}")]
    Upstream(#[from] ProviderError),
}

/// Strips a leading ```` ```json ```` / ```` ``` ```` fence and a trailing
/// ```` ``` ```` fence from model output.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let opened = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(str::trim_start)
        .unwrap_or(trimmed);
    opened
        .strip_suffix("```")
        .map(str::trim_end)
        .unwrap_or(opened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n{\"is_scam\": true}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"is_scam\": true}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(strip_code_fences("plain reply"), "plain reply");
    }

    #[tokio::test]
    async fn complete_returns_stripped_content() {
        let provider = Arc::new(MockAiProvider::new().with_response("```json\n{\"ok\":1}\n```"));
        let gateway = ModelGateway::new(provider);

        let text = gateway
            .complete("prompt", 0.3, 1024, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(text, "{\"ok\":1}");
    }

    #[tokio::test]
    async fn complete_times_out_on_slow_provider() {
        let provider = Arc::new(
            MockAiProvider::new()
                .with_response("too late")
                .with_delay(Duration::from_secs(60)),
        );
        let gateway = ModelGateway::new(provider);

        let result = gateway
            .complete("prompt", 0.3, 1024, Duration::from_millis(20))
            .await;
        assert!(matches!(result, Err(GatewayError::Timeout(_))));
    }

    #[tokio::test]
    async fn complete_surfaces_upstream_errors() {
        let provider = Arc::new(MockAiProvider::new().with_error(MockError::AuthenticationFailed));
        let gateway = ModelGateway::new(provider);

        let result = gateway
            .complete("prompt", 0.3, 1024, Duration::from_secs(5))
            .await;
        assert!(matches!(result, Err(GatewayError::Upstream(_))));
    }

    #[tokio::test]
    async fn complete_passes_sampling_parameters_through() {
        let provider = Arc::new(MockAiProvider::new().with_response("ok"));
        let gateway = ModelGateway::new(provider.clone());

        gateway
            .complete("prompt", 0.85, 512, Duration::from_secs(5))
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, 0.85);
        assert_eq!(calls[0].max_tokens, 512);
        assert_eq!(calls[0].system_prompt, SYSTEM_INSTRUCTION);
    }
}
