//! Per-session turn tracking
//!
//! Decides the cadence on which the user profile is re-injected: always on
//! the first turn of a session, then every Nth turn after that.
//!
//! The map is capacity-bounded so long-lived processes do not accumulate
//! counters for every session they ever saw; hosts that emit session-end
//! notifications can also clear entries eagerly via [`SessionTracker::end_session`].

use std::collections::HashMap;
use std::sync::Mutex;

/// Maximum number of session keys tracked at once. Inserting a new key past
/// this bound evicts the least-recently-touched entry.
const MAX_TRACKED_SESSIONS: usize = 1024;

#[derive(Debug)]
struct SessionEntry {
    turn_count: u64,
    last_touched: u64,
}

/// Process-wide turn counters, keyed by opaque session key.
///
/// `advance` is a single locked read-increment-return, so two overlapping
/// recalls for the same key can never observe the same count.
#[derive(Debug, Default)]
pub struct SessionTracker {
    inner: Mutex<TrackerState>,
}

#[derive(Debug, Default)]
struct TrackerState {
    sessions: HashMap<String, SessionEntry>,
    clock: u64,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the turn count for `session_key`, creating the
    /// entry on first contact. Callers invoke this exactly once per recall.
    pub fn advance(&self, session_key: &str) -> u64 {
        let mut state = self.inner.lock().expect("session tracker lock poisoned");
        state.clock += 1;
        let now = state.clock;

        if let Some(entry) = state.sessions.get_mut(session_key) {
            entry.turn_count += 1;
            entry.last_touched = now;
            return entry.turn_count;
        }

        if state.sessions.len() >= MAX_TRACKED_SESSIONS {
            if let Some(stale) = state
                .sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_touched)
                .map(|(key, _)| key.clone())
            {
                state.sessions.remove(&stale);
            }
        }

        state.sessions.insert(
            session_key.to_string(),
            SessionEntry {
                turn_count: 1,
                last_touched: now,
            },
        );
        1
    }

    /// Drop the counter for a session that has ended.
    pub fn end_session(&self, session_key: &str) {
        let mut state = self.inner.lock().expect("session tracker lock poisoned");
        state.sessions.remove(session_key);
    }

    /// Number of sessions currently tracked.
    pub fn tracked_sessions(&self) -> usize {
        let state = self.inner.lock().expect("session tracker lock poisoned");
        state.sessions.len()
    }
}

/// Cadence rule: inject the profile on first contact, then refresh every
/// `frequency`-th turn.
pub fn is_profile_turn(turn_count: u64, frequency: u32) -> bool {
    turn_count == 1 || turn_count % u64::from(frequency) == 0
}
