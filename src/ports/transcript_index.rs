//! Transcript Index Port - persistence and similarity lookup for completed
//! scam conversation transcripts.
//!
//! The request pipeline only ever writes; `search` exists for offline
//! analysis of recurring scam patterns and is never consulted when answering
//! a request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A transcript persisted to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Session id the transcript belongs to.
    pub id: String,
    /// Full conversation text, one `sender: text` line per message.
    pub text: String,
    /// Descriptive metadata stored alongside the document.
    pub metadata: TranscriptMetadata,
}

/// Metadata stored with a transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMetadata {
    /// Sender the session was keyed on.
    pub sender: String,
    /// Scam category from the detection verdict, when known.
    pub scam_type: Option<String>,
    /// Channel the conversation arrived on, when known.
    pub channel: Option<String>,
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptMatch {
    /// The stored record.
    pub record: TranscriptRecord,
    /// Similarity score in [0, 1], higher is closer.
    pub score: f64,
}

/// Port for transcript persistence and nearest-neighbor lookup.
#[async_trait]
pub trait TranscriptIndex: Send + Sync {
    /// Persist a transcript. Storing under an existing id overwrites the
    /// previous record for that session.
    async fn store(&self, record: TranscriptRecord) -> Result<(), TranscriptIndexError>;

    /// Return the `top_k` transcripts most similar to `query`.
    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<TranscriptMatch>, TranscriptIndexError>;
}

/// Transcript index errors.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptIndexError {
    #[error("index I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("index record corrupt: {0}")]
    Corrupt(String),
}
