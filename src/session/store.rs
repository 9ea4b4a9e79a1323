//! Session arena.
//!
//! Active simulations are held in an explicit store keyed by a random
//! session id, rather than in process-wide global state, so concurrent
//! callers and tests cannot interfere with each other's runs. The store
//! itself performs no locking; a shared deployment serializes access
//! around it (one mutating operation per session at a time).

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::SimulationSession;

/// Opaque identifier of a stored session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        SessionId(format!("{:032x}", rng.random::<u128>()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

/// An arena of active simulation sessions, keyed by session id.
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, SimulationSession>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a session and returns its freshly generated id.
    pub fn insert(&mut self, session: SimulationSession) -> SessionId {
        let mut rng = rand::rng();
        let id = loop {
            let candidate = SessionId::generate(&mut rng);
            if !self.sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        self.sessions.insert(id.clone(), session);
        id
    }

    /// Looks up a session for read-only access.
    pub fn get(&self, id: &SessionId) -> Option<&SimulationSession> {
        self.sessions.get(id)
    }

    /// Looks up a session for stepping/resetting.
    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut SimulationSession> {
        self.sessions.get_mut(id)
    }

    /// Removes a session, returning it if present.
    pub fn remove(&mut self, id: &SessionId) -> Option<SimulationSession> {
        self.sessions.remove(id)
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessSpec, StrategyKind, StrategyParams};

    fn session(burst: i64) -> SimulationSession {
        SimulationSession::configure(
            vec![ProcessSpec::new("P1", 0, burst)],
            StrategyKind::Fcfs,
            StrategyParams::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_get_remove() {
        let mut store = SessionStore::new();
        assert!(store.is_empty());

        let id = store.insert(session(3));
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());

        let removed = store.remove(&id);
        assert!(removed.is_some());
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = SessionStore::new();
        let a = store.insert(session(1));
        let b = store.insert(session(1));
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut store = SessionStore::new();
        let a = store.insert(session(2));
        let b = store.insert(session(2));

        store.get_mut(&a).unwrap().step().unwrap();
        assert_eq!(store.get(&a).unwrap().current_tick(), 1);
        assert_eq!(store.get(&b).unwrap().current_tick(), 0);
    }

    #[test]
    fn test_unknown_id_misses() {
        let mut store = SessionStore::new();
        let ghost = SessionId::from("deadbeef".to_string());
        assert!(store.get(&ghost).is_none());
        assert!(store.get_mut(&ghost).is_none());
        assert!(store.remove(&ghost).is_none());
    }
}
