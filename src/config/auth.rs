//! Inbound authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Inbound API key configuration.
///
/// Callers must present this key in the `x-api-key` header; the comparison is
/// performed in constant time by the auth middleware.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared API key expected from callers
    pub api_key: Secret<String>,
}

impl AuthConfig {
    /// Expose the configured key for comparison
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__API_KEY"));
        }
        Ok(())
    }
}
