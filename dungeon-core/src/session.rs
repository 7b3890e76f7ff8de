//! Session store: one [`GameState`] per chat room.
//!
//! The map itself is only locked long enough to look up, insert or remove a
//! handle. Each session has its own lock, held for the whole of an action, so
//! different rooms never wait on each other.

use crate::state::{GameState, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// A running game and the time of its last action.
#[derive(Debug)]
pub struct Session {
    pub state: GameState,
    last_active: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            state: GameState::new(),
            last_active: Instant::now(),
        }
    }

    /// Mark the session as used now.
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session. Returns `None` if one is already running.
    pub async fn create(&self, id: SessionId) -> Option<SessionHandle> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&id) {
            return None;
        }
        let handle = Arc::new(Mutex::new(Session::new()));
        sessions.insert(id, Arc::clone(&handle));
        debug!(session = %id, "session created");
        Some(handle)
    }

    pub async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.lock().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: SessionId) -> Option<SessionHandle> {
        let removed = self.sessions.lock().await.remove(&id);
        if removed.is_some() {
            debug!(session = %id, "session removed");
        }
        removed
    }

    pub async fn contains(&self, id: SessionId) -> bool {
        self.sessions.lock().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every session idle for longer than `timeout`.
    ///
    /// A session whose lock is held is mid-action and therefore not idle.
    pub async fn evict_idle(&self, timeout: Duration) -> Vec<SessionId> {
        let mut sessions = self.sessions.lock().await;
        let expired: Vec<SessionId> = sessions
            .iter()
            .filter(|(_, handle)| {
                handle
                    .try_lock()
                    .map(|session| session.idle_for() > timeout)
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            sessions.remove(id);
            debug!(session = %id, "idle session evicted");
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new();
        let id = SessionId(-100);

        assert!(store.get(id).await.is_none());
        assert!(store.create(id).await.is_some());
        assert!(store.create(id).await.is_none());
        assert!(store.contains(id).await);
        assert_eq!(store.len().await, 1);

        assert!(store.remove(id).await.is_some());
        assert!(store.remove(id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let a = store.create(SessionId(1)).await.unwrap();
        store.create(SessionId(2)).await.unwrap();

        a.lock()
            .await
            .state
            .add_player(crate::state::Player::new(crate::state::PlayerId(7), "Ann", 3));

        let b = store.get(SessionId(2)).await.unwrap();
        assert!(b.lock().await.state.is_empty());
        assert_eq!(a.lock().await.state.player_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle() {
        let store = SessionStore::new();
        store.create(SessionId(1)).await;
        let fresh = store.create(SessionId(2)).await.unwrap();

        tokio::time::advance(Duration::from_secs(90)).await;
        fresh.lock().await.touch();
        tokio::time::advance(Duration::from_secs(30)).await;

        let evicted = store.evict_idle(Duration::from_secs(60)).await;
        assert_eq!(evicted, vec![SessionId(1)]);
        assert!(store.contains(SessionId(2)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_session_not_evicted() {
        let store = SessionStore::new();
        let handle = store.create(SessionId(1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(600)).await;

        let _busy = handle.lock().await;
        assert!(store.evict_idle(Duration::from_secs(60)).await.is_empty());
    }
}
