//! Transcript storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Transcript index storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted conversation transcripts
    #[serde(default = "default_persist_dir")]
    pub persist_dir: String,
}

impl StorageConfig {
    /// Get the persistence directory as a path
    pub fn persist_path(&self) -> PathBuf {
        PathBuf::from(&self.persist_dir)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.persist_dir.trim().is_empty() {
            return Err(ValidationError::EmptyStorageDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist_dir: default_persist_dir(),
        }
    }
}

fn default_persist_dir() -> String {
    "./transcript_data".to_string()
}
