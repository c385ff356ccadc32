//! Session Store Port - keyed store for per-sender-per-day session state.
//!
//! The store is advisory and best-effort: a failed read or write must never
//! fail the surrounding request. There is deliberately no per-key locking,
//! so concurrent requests for the same derived id can race on `turn_count`;
//! this is an accepted limitation of the in-memory deployment, not a design
//! goal.

use async_trait::async_trait;

use crate::domain::{Session, SessionId};

/// Port for session state storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session, if one exists for this id.
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Initialize and persist a fresh session for this id.
    async fn init(&self, id: &SessionId) -> Result<Session, SessionStoreError>;

    /// Persist session state, stamping `last_updated`.
    async fn save(&self, id: &SessionId, session: Session) -> Result<(), SessionStoreError>;
}

/// Session store errors. Treated as non-fatal by callers.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
