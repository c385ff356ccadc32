//! Request pipeline configuration
//!
//! Per-stage and whole-request timeout budgets for the scam-detection
//! pipeline, plus the turn threshold gating intelligence extraction. Each
//! stage budget must fit inside the request budget so a single slow stage can
//! never push the request past the caller's own timeout.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Pipeline timeout and threshold configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Detection stage timeout in seconds
    #[serde(default = "default_detection_timeout")]
    pub detection_timeout_secs: u64,

    /// Engagement stage timeout in seconds
    #[serde(default = "default_engagement_timeout")]
    pub engagement_timeout_secs: u64,

    /// Extraction stage timeout in seconds
    #[serde(default = "default_extraction_timeout")]
    pub extraction_timeout_secs: u64,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Session turn count at which intelligence extraction kicks in
    #[serde(default = "default_extraction_threshold")]
    pub extraction_turn_threshold: u32,
}

impl PipelineConfig {
    pub fn detection_timeout(&self) -> Duration {
        Duration::from_secs(self.detection_timeout_secs)
    }

    pub fn engagement_timeout(&self) -> Duration {
        Duration::from_secs(self.engagement_timeout_secs)
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate pipeline configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        let stages = [
            self.detection_timeout_secs,
            self.engagement_timeout_secs,
            self.extraction_timeout_secs,
        ];
        if stages.iter().any(|&s| s == 0) {
            return Err(ValidationError::InvalidTimeout);
        }
        if stages.iter().any(|&s| s >= self.request_timeout_secs) {
            return Err(ValidationError::StageTimeoutExceedsRequest);
        }
        if self.extraction_turn_threshold == 0 {
            return Err(ValidationError::InvalidTurnThreshold);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detection_timeout_secs: default_detection_timeout(),
            engagement_timeout_secs: default_engagement_timeout(),
            extraction_timeout_secs: default_extraction_timeout(),
            request_timeout_secs: default_request_timeout(),
            extraction_turn_threshold: default_extraction_threshold(),
        }
    }
}

fn default_detection_timeout() -> u64 {
    8
}

fn default_engagement_timeout() -> u64 {
    15
}

fn default_extraction_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    25
}

fn default_extraction_threshold() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.detection_timeout(), Duration::from_secs(8));
        assert_eq!(config.engagement_timeout(), Duration::from_secs(15));
        assert_eq!(config.extraction_timeout(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), Duration::from_secs(25));
        assert_eq!(config.extraction_turn_threshold, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_stage_timeout() {
        let config = PipelineConfig {
            detection_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_stage_exceeds_request() {
        let config = PipelineConfig {
            engagement_timeout_secs: 30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::StageTimeoutExceedsRequest)
        ));
    }

    #[test]
    fn test_validation_zero_threshold() {
        let config = PipelineConfig {
            extraction_turn_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTurnThreshold)
        ));
    }
}
