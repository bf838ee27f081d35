//! SessionController — concurrent registry of live sessions via DashMap.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::session::IqrSession;

/// Thread-safe registry of active [`IqrSession`]s, keyed by session uuid.
///
/// Sessions are handed out as `Arc` clones; per-session synchronization is
/// the session's own mutex, so the registry never serializes operations
/// across different sessions.
pub struct SessionController {
    sessions: DashMap<String, Arc<IqrSession>>,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a session under its uuid. Replaces any previous session
    /// with the same uuid, returning it.
    pub fn add_session(&self, session: Arc<IqrSession>) -> Option<Arc<IqrSession>> {
        let uuid = session.uuid().to_string();
        info!(session = %uuid, "session registered");
        self.sessions.insert(uuid, session)
    }

    /// Look up a session by uuid.
    pub fn get_session(&self, uuid: &str) -> Option<Arc<IqrSession>> {
        self.sessions.get(uuid).map(|r| Arc::clone(&r))
    }

    pub fn has_session(&self, uuid: &str) -> bool {
        self.sessions.contains_key(uuid)
    }

    /// Remove and return a session.
    pub fn remove_session(&self, uuid: &str) -> Option<Arc<IqrSession>> {
        let removed = self.sessions.remove(uuid).map(|(_, s)| s);
        if removed.is_some() {
            info!(session = %uuid, "session removed");
        }
        removed
    }

    /// Uuids of all registered sessions.
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of registered sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
