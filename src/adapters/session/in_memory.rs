//! In-Memory Session Store Adapter
//!
//! Stores session state in a process-local map. Sessions live for process
//! lifetime; there is no eviction. The map itself is synchronized, but the
//! load-modify-save cycle around it is not, so concurrent requests for the
//! same derived id can clobber each other's `turn_count` - an accepted
//! limitation of this deployment.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Session, SessionId};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for session state
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn init(&self, id: &SessionId) -> Result<Session, SessionStoreError> {
        let session = Session::new();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), session.clone());
        Ok(session)
    }

    async fn save(&self, id: &SessionId, mut session: Session) -> Result<(), SessionStoreError> {
        session.last_updated = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), session);
        Ok(())
    }
}
