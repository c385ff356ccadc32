//! Inbound message, conversation history and advisory metadata.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
///
/// `sender` is an open string ("scammer", "user", or whatever the caller's
/// channel uses); `timestamp` accepts either a string or a number and is not
/// strictly validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    #[serde(default = "Timestamp::now")]
    pub timestamp: Timestamp,
}

impl Message {
    /// Creates a new message stamped with the current time.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Renders the message as a `sender: text` transcript line.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.sender, self.text)
    }
}

/// A message timestamp as received on the wire.
///
/// Callers send ISO-8601 strings, but epoch numbers show up too; both are
/// accepted and carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Numeric(f64),
}

impl Timestamp {
    /// Current time as an ISO-8601 string timestamp.
    pub fn now() -> Self {
        Timestamp::Text(Utc::now().to_rfc3339())
    }

    /// The calendar-date portion of an ISO-8601 string timestamp, if any.
    ///
    /// Returns the text before the first `T`. Numeric timestamps and strings
    /// without a `T` separator have no extractable date portion.
    pub fn date_portion(&self) -> Option<&str> {
        match self {
            Timestamp::Text(s) => {
                let (date, _) = s.split_once('T')?;
                Some(date)
            }
            Timestamp::Numeric(_) => None,
        }
    }

    /// Raw textual form, used for fallback session-id hashing.
    pub fn raw(&self) -> String {
        match self {
            Timestamp::Text(s) => s.clone(),
            Timestamp::Numeric(n) => n.to_string(),
        }
    }
}

/// Advisory context passed into prompts; never affects control flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Channel the conversation arrived on (SMS, WhatsApp, Email, Chat)
    pub channel: Option<String>,
    /// Language of the conversation
    pub language: Option<String>,
    /// Country/region code
    pub locale: Option<String>,
}

impl Metadata {
    /// Conversation language, defaulting to English.
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("English")
    }

    /// Country/region code, defaulting to IN.
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or("IN")
    }
}
