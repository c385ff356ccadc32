//! File-based Transcript Index Adapter
//!
//! Stores each transcript as a JSON document under the configured directory,
//! one file per session. Storing under an existing session id overwrites the
//! previous document. Search scans the directory and ranks by token-overlap
//! similarity.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{TranscriptIndex, TranscriptIndexError, TranscriptMatch, TranscriptRecord};

use super::similarity;

/// File-backed transcript storage
#[derive(Debug, Clone)]
pub struct FileTranscriptIndex {
    base_path: PathBuf,
}

impl FileTranscriptIndex {
    /// Create a new file index rooted at `base_path`
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// File path for a record. Session ids can contain characters that are
    /// awkward in filenames (`+`, `/`), so the name is a sanitized prefix
    /// plus a short hash of the full id for uniqueness.
    fn record_path(&self, id: &str) -> PathBuf {
        let sanitized: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
            .take(64)
            .collect();

        let mut hasher = Sha256::new();
        hasher.update(id.as_bytes());
        let digest = hasher.finalize();
        let tag: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();

        self.base_path.join(format!("{}-{}.json", sanitized, tag))
    }

    async fn ensure_dir(&self) -> Result<(), TranscriptIndexError> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}

#[async_trait]
impl TranscriptIndex for FileTranscriptIndex {
    async fn store(&self, record: TranscriptRecord) -> Result<(), TranscriptIndexError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| TranscriptIndexError::Corrupt(e.to_string()))?;
        fs::write(self.record_path(&record.id), json).await?;
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<TranscriptMatch>, TranscriptIndexError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path).await?;
            let record: TranscriptRecord = serde_json::from_str(&json)
                .map_err(|e| TranscriptIndexError::Corrupt(format!("{}: {}", path.display(), e)))?;

            let score = similarity(query, &record.text);
            if score > 0.0 {
                matches.push(TranscriptMatch { record, score });
            }
        }

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }
}
