//! Session-scoped tuning state cache.
//!
//! Hosts that run several worlds share one process; each world session
//! caches its built rule chain here. Entries never expire on their own —
//! the host calls [`SessionRegistry::teardown`] at the session boundary
//! and [`SessionRegistry::teardown_all`] at shutdown, so nothing outlives
//! the world it was built for.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::ai::rules::TuneState;

/// Process-wide registry of per-session tuning state.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Arc<TuneState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache the tuning state for a session, replacing any previous entry.
    pub fn insert(&mut self, session: &str, state: Arc<TuneState>) {
        self.sessions.insert(session.to_string(), state);
    }

    /// The cached state for a session, if any.
    pub fn get(&self, session: &str) -> Option<Arc<TuneState>> {
        self.sessions.get(session).cloned()
    }

    /// Drop a session's entry. Returns whether one existed.
    pub fn teardown(&mut self, session: &str) -> bool {
        let existed = self.sessions.remove(session).is_some();
        if existed {
            debug!("tore down tuning state for session '{session}'");
        }
        existed
    }

    /// Drop every entry (shutdown hook). Returns how many were dropped.
    pub fn teardown_all(&mut self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        if count > 0 {
            debug!("tore down tuning state for {count} sessions");
        }
        count
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
