// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BlumiraMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blumira MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-session navigation state.
//!
//! Reads and writes take a short, non-async lock over the session map. Multi-step
//! transitions (navigate, back) additionally hold the session's turn gate so that a
//! credential check and the state write it guards are not interleaved with another
//! transition of the same session. Other sessions are never blocked by a gate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tokio::sync::OwnedMutexGuard;

use crate::model::{Domain, NavigationState, SessionId};

#[derive(Debug)]
struct SessionEntry {
    state: NavigationState,
    last_seen: Instant,
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self {
            state: NavigationState::default(),
            last_seen: now,
            gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStates {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

impl SessionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the session's state, creating it at top level on first access.
    pub fn get(&self, session_id: &SessionId) -> NavigationState {
        self.with_entry(session_id, |entry| entry.state)
    }

    pub fn set(&self, session_id: &SessionId, domain: Domain) {
        self.with_entry(session_id, |entry| entry.state.enter(domain));
    }

    pub fn clear(&self, session_id: &SessionId) {
        self.with_entry(session_id, |entry| entry.state.leave());
    }

    /// Waits for exclusive use of the session's transition gate.
    pub async fn begin_turn(&self, session_id: &SessionId) -> OwnedMutexGuard<()> {
        let gate = self.with_entry(session_id, |entry| entry.gate.clone());
        gate.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn remove(&self, session_id: &SessionId) -> bool {
        self.lock().remove(session_id).is_some()
    }

    /// Drops sessions idle for longer than `ttl`. Sessions with a transition in flight
    /// are kept regardless of age. Returns the number removed.
    pub fn prune_idle(&self, ttl: Duration) -> usize {
        self.prune_idle_at(ttl, Instant::now())
    }

    fn prune_idle_at(&self, ttl: Duration, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            Arc::strong_count(&entry.gate) > 1 || now.saturating_duration_since(entry.last_seen) <= ttl
        });
        before - sessions.len()
    }

    fn with_entry<R>(&self, session_id: &SessionId, f: impl FnOnce(&mut SessionEntry) -> R) -> R {
        let now = Instant::now();
        let mut sessions = self.lock();
        let entry = sessions.entry(session_id.clone()).or_insert_with(|| SessionEntry::new(now));
        entry.last_seen = now;
        f(entry)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn states() -> SessionStates {
        SessionStates::new()
    }

    fn sid(value: &str) -> SessionId {
        SessionId::new(value).expect("session id")
    }

    #[rstest]
    fn first_access_creates_top_level_state(states: SessionStates) {
        assert!(states.is_empty());
        assert_eq!(states.get(&sid("s-1")).current_domain(), None);
        assert_eq!(states.len(), 1);

        states.get(&sid("s-1"));
        assert_eq!(states.len(), 1);
    }

    #[rstest]
    fn set_and_clear_track_the_current_domain(states: SessionStates) {
        let session = sid("s-2");
        states.set(&session, Domain::Findings);
        assert_eq!(states.get(&session).current_domain(), Some(Domain::Findings));

        states.clear(&session);
        assert!(states.get(&session).is_top_level());
    }

    #[rstest]
    fn sessions_are_isolated(states: SessionStates) {
        let s3 = sid("s-3");
        let s4 = sid("s-4");
        states.get(&s4);
        states.set(&s3, Domain::Agents);

        assert_eq!(states.get(&s3).current_domain(), Some(Domain::Agents));
        assert_eq!(states.get(&s4).current_domain(), None);
    }

    #[test]
    fn concurrent_writers_on_distinct_sessions_do_not_interfere() {
        let states = Arc::new(SessionStates::new());
        let handles = Domain::ALL
            .into_iter()
            .enumerate()
            .map(|(index, domain)| {
                let states = states.clone();
                std::thread::spawn(move || {
                    let session = sid(&format!("worker-{index}"));
                    for _ in 0..100 {
                        states.set(&session, domain);
                        assert_eq!(states.get(&session).current_domain(), Some(domain));
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().expect("join");
        }

        for (index, domain) in Domain::ALL.into_iter().enumerate() {
            let session = sid(&format!("worker-{index}"));
            assert_eq!(states.get(&session).current_domain(), Some(domain));
        }
    }

    #[rstest]
    fn prune_removes_only_idle_sessions(states: SessionStates) {
        let stale = sid("stale");
        let fresh = sid("fresh");
        states.set(&stale, Domain::Users);

        let later = Instant::now() + Duration::from_secs(120);
        states.get(&fresh);
        {
            let mut sessions = states.lock();
            sessions.get_mut(&fresh).expect("fresh").last_seen = later;
        }

        let removed = states.prune_idle_at(Duration::from_secs(60), later);
        assert_eq!(removed, 1);
        assert_eq!(states.len(), 1);
        assert!(states.get(&stale).is_top_level());
    }

    #[rstest]
    fn prune_keeps_sessions_with_a_turn_in_flight(states: SessionStates) {
        let runtime =
            tokio::runtime::Builder::new_current_thread().enable_all().build().expect("runtime");
        let session = sid("busy");
        let guard = runtime.block_on(states.begin_turn(&session));

        let later = Instant::now() + Duration::from_secs(3600);
        assert_eq!(states.prune_idle_at(Duration::from_secs(1), later), 0);

        drop(guard);
        assert_eq!(states.prune_idle_at(Duration::from_secs(1), later), 1);
    }

    #[test]
    fn turns_serialize_within_a_session_only() {
        let runtime =
            tokio::runtime::Builder::new_current_thread().enable_all().build().expect("runtime");
        let states = SessionStates::new();
        runtime.block_on(async {
            let held = states.begin_turn(&sid("a")).await;

            let other = tokio::time::timeout(Duration::from_millis(50), states.begin_turn(&sid("b")))
                .await;
            assert!(other.is_ok(), "other sessions must not wait");

            let same = tokio::time::timeout(Duration::from_millis(50), states.begin_turn(&sid("a")))
                .await;
            assert!(same.is_err(), "same session must wait for the held turn");

            drop(held);
        });
    }
}
