//! Extracted fraud indicators and derived engagement metrics.

use serde::{Deserialize, Serialize};

/// Fraud indicators pulled from a conversation transcript.
///
/// Five independent lists; a field the model omits deserializes to an empty
/// vec, never null. Extraction is best-effort text matching by the model —
/// no dedup or validation is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIntelligence {
    #[serde(default)]
    pub bank_accounts: Vec<String>,
    #[serde(default)]
    pub upi_ids: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub phishing_links: Vec<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl ExtractedIntelligence {
    /// True when no indicator of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.bank_accounts.is_empty()
            && self.upi_ids.is_empty()
            && self.phone_numbers.is_empty()
            && self.phishing_links.is_empty()
            && self.email_addresses.is_empty()
    }
}

/// Engagement statistics derived from session state at response-build time.
///
/// Not stored anywhere; both values are linear in the session turn count
/// (one scammer message and one agent reply per turn, ~45s of scammer time
/// per exchange).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub engagement_duration_seconds: u64,
    pub total_messages_exchanged: u32,
}

impl EngagementMetrics {
    /// Derives metrics from a session's turn count.
    pub fn from_turn_count(turn_count: u32) -> Self {
        Self {
            engagement_duration_seconds: u64::from(turn_count) * 45,
            total_messages_exchanged: turn_count * 2,
        }
    }
}
