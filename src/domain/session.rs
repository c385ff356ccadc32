//! Per-sender-per-day conversation session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::message::Timestamp;

/// Identifier collapsing all of one sender's messages on one calendar day
/// into a single session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Derives a session id from the sender and message timestamp.
    ///
    /// The id is `{sender}_{date}` where `date` is the ISO date portion of
    /// the timestamp, taken verbatim with no timezone normalization. A
    /// timestamp with no date portion falls back to the current UTC date, so
    /// derivation never fails the request. An empty sender gets a stable
    /// hash-based id instead, since `_2026-08-06` would collide across
    /// unrelated anonymous callers.
    pub fn derive(sender: &str, timestamp: &Timestamp) -> Self {
        if sender.trim().is_empty() {
            return Self::hashed_fallback(sender, timestamp);
        }
        let date = match timestamp.date_portion() {
            Some(date) => date.to_string(),
            None => Utc::now().format("%Y-%m-%d").to_string(),
        };
        SessionId(format!("{}_{}", sender, date))
    }

    /// Stable last-resort id derived by hashing the raw inputs.
    fn hashed_fallback(sender: &str, timestamp: &Timestamp) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(sender.as_bytes());
        hasher.update(b"|");
        hasher.update(timestamp.raw().as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest
            .iter()
            .take(16)
            .map(|b| format!("{:02x}", b))
            .collect();
        SessionId(hex)
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutable per-session state.
///
/// Created on the first scam-flagged message from a sender on a given day and
/// kept for process lifetime; there is no eviction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Completed engagement turns (scammer message + agent reply)
    pub turn_count: u32,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Whether intelligence extraction has succeeded for this session
    pub intelligence_extracted: bool,
    /// Stamped by the store on every save
    pub last_updated: DateTime<Utc>,
}

impl Session {
    /// Fresh session with a zeroed turn count.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            turn_count: 0,
            created_at: now,
            intelligence_extracted: false,
            last_updated: now,
        }
    }

    /// Records one completed engagement turn.
    pub fn record_turn(&mut self) {
        self.turn_count += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
