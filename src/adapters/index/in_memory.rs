//! In-memory transcript index, for tests and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{TranscriptIndex, TranscriptIndexError, TranscriptMatch, TranscriptRecord};

use super::similarity;

/// In-memory transcript storage with token-overlap search.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptIndex {
    records: Arc<RwLock<HashMap<String, TranscriptRecord>>>,
}

impl InMemoryTranscriptIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored transcripts
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl TranscriptIndex for InMemoryTranscriptIndex {
    async fn store(&self, record: TranscriptRecord) -> Result<(), TranscriptIndexError> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<TranscriptMatch>, TranscriptIndexError> {
        let records = self.records.read().await;
        let mut matches: Vec<TranscriptMatch> = records
            .values()
            .map(|record| TranscriptMatch {
                score: similarity(query, &record.text),
                record: record.clone(),
            })
            .filter(|m| m.score > 0.0)
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }
}
