//! Per-channel conversation sessions with idle expiry.

use crate::WorkflowState;
use postilion_core::{ChannelId, Draft};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// One conversation session: the current workflow state and the draft
/// accumulated so far. Lifetime is one workflow run.
#[derive(Debug)]
pub struct Session {
    /// Current workflow state
    pub state: WorkflowState,
    /// Accumulated draft fields
    pub draft: Draft,
    touched: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            draft: Draft::default(),
            touched: Instant::now(),
        }
    }

    /// Mark the session as active now.
    pub fn touch(&mut self) {
        self.touched = Instant::now();
    }

    /// How long the session has been idle.
    pub fn idle_for(&self) -> Duration {
        self.touched.elapsed()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Mapping from channel identity to its session.
///
/// Each session sits behind its own async mutex: holding it for the whole
/// of one event's handling serializes events per identity while letting
/// other sessions proceed. The outer map lock is only ever held for a
/// lookup or insert, never across an await.
pub struct SessionStore {
    sessions: parking_lot::Mutex<HashMap<ChannelId, Arc<Mutex<Session>>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Create a store that expires sessions idle longer than `idle_ttl`.
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: parking_lot::Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// The session for this channel, created on first use.
    pub fn get_or_create(&self, channel: ChannelId) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock();
        sessions
            .entry(channel)
            .or_insert_with(|| {
                debug!(%channel, "Creating session");
                Arc::new(Mutex::new(Session::new()))
            })
            .clone()
    }

    /// Drop the session for this channel, if any.
    pub fn remove(&self, channel: ChannelId) {
        self.sessions.lock().remove(&channel);
    }

    /// Remove sessions idle past the TTL. Sessions currently handling an
    /// event hold their mutex and are skipped.
    pub fn expire_idle(&self) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|channel, entry| match entry.try_lock() {
            Ok(session) => {
                let keep = session.idle_for() <= self.idle_ttl;
                if !keep {
                    debug!(%channel, "Expiring idle session");
                }
                keep
            }
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Expired idle sessions");
        }
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_session_per_channel() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.get_or_create(ChannelId(1));
        let b = store.get_or_create(ChannelId(1));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_expire_idle_sweeps_stale_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        store.get_or_create(ChannelId(1));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.expire_idle(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_expire_idle_keeps_fresh_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.get_or_create(ChannelId(1));
        assert_eq!(store.expire_idle(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_expire_idle_skips_locked_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        let session = store.get_or_create(ChannelId(1));
        let guard = session.try_lock().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.expire_idle(), 0);
        drop(guard);
        assert_eq!(store.expire_idle(), 1);
    }
}
