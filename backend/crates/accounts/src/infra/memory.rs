//! In-Memory Session Store
//!
//! Sessions are ephemeral and never touch the credential store, so they
//! live in a process-local map. Restarting the server logs everyone out,
//! which is the intended behavior for this system.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::error::AccountResult;

/// Process-local session store
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries (expired-but-unswept included)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session) -> AccountResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AccountResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: Uuid) -> AccountResult<()> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }
}
