//! In-memory session store.

use std::collections::BTreeMap;

use jiff::Timestamp;
use log::debug;

use crate::{
    error::{ResearchError, Result},
    fixtures::fixture_sessions,
    models::ResearchSession,
};

/// Holds the sessions known to one application instance.
///
/// The store is created once and passed to whoever needs it. Sessions are
/// keyed by research id and listed in id order.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: BTreeMap<String, ResearchSession>,
    seeded_at: Option<Timestamp>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the fixture sessions, all created now.
    pub fn with_fixtures() -> Self {
        Self::with_fixtures_at(Timestamp::now())
    }

    /// Creates a store seeded with the fixture sessions created at `at`.
    pub fn with_fixtures_at(at: Timestamp) -> Self {
        let mut store = Self {
            sessions: BTreeMap::new(),
            seeded_at: Some(at),
        };
        store.seed(at);
        store
    }

    fn seed(&mut self, at: Timestamp) {
        for session in fixture_sessions(at) {
            self.sessions.insert(session.research_id.clone(), session);
        }
    }

    pub fn list(&self) -> Vec<ResearchSession> {
        self.sessions.values().cloned().collect()
    }

    pub fn get(&self, research_id: &str) -> Option<ResearchSession> {
        self.sessions.get(research_id).cloned()
    }

    /// Like [`get`](Self::get), but a missing session is an error.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::SessionNotFound` if no session has that id.
    pub fn require(&self, research_id: &str) -> Result<ResearchSession> {
        self.get(research_id)
            .ok_or_else(|| ResearchError::SessionNotFound {
                id: research_id.to_string(),
            })
    }

    /// Inserts or replaces a session, returning the previous record.
    pub fn upsert(&mut self, session: ResearchSession) -> Option<ResearchSession> {
        debug!("Storing session {}", session.research_id);
        self.sessions.insert(session.research_id.clone(), session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops every change and restores the initial contents.
    pub fn reset(&mut self) {
        self.sessions.clear();
        if let Some(at) = self.seeded_at {
            self.seed(at);
        }
    }
}
