//! Per-user session store
//!
//! One session per user identity. The map lock is only held to look up or
//! insert a handle; each session has its own lock, so one user's messages
//! are serialized without blocking anyone else's.

use crate::state_machine::{ConvState, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// In-progress conversation of one user
#[derive(Debug)]
pub struct Session {
    pub state: ConvState,
    last_activity: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            state: ConvState::Idle,
            last_activity: Instant::now(),
        }
    }

    /// Record that the user just interacted
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Back to the main menu with nothing collected
    pub fn reset(&mut self) {
        self.state = ConvState::Idle;
    }
}

/// Shared handle to one user's session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Key-addressed store of sessions
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the user's session, creating an idle one on first contact
    pub async fn get_or_create(&self, user_id: UserId) -> SessionHandle {
        // Check if already present
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(&user_id) {
                return Arc::clone(handle);
            }
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(user_id).or_insert_with(|| {
            tracing::debug!(user_id = %user_id, "Creating session");
            Arc::new(Mutex::new(Session::new()))
        }))
    }

    pub async fn get(&self, user_id: UserId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    /// Reset an existing session to `Idle`. Returns false if the user has none.
    pub async fn reset(&self, user_id: UserId) -> bool {
        let Some(handle) = self.get(user_id).await else {
            return false;
        };
        handle.lock().await.reset();
        tracing::info!(user_id = %user_id, "Session reset");
        true
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions that have seen no message for at least `max_idle`
    ///
    /// Sessions that are locked or whose handle is held elsewhere are in use
    /// and always kept. Returns the number of evicted sessions.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|user_id, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            let Ok(session) = handle.try_lock() else {
                return true;
            };
            let stale = session.idle_for() >= max_idle;
            if stale {
                tracing::debug!(user_id = %user_id, state = session.state.name(), "Evicting idle session");
            }
            !stale
        });

        before - sessions.len()
    }

    /// Periodically evict sessions idle for longer than `max_idle`
    pub fn spawn_sweeper(self: &Arc<Self>, max_idle: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let period = (max_idle / 4).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(max_idle).await;
                if evicted > 0 {
                    let remaining = store.len().await;
                    tracing::info!(evicted, remaining, "Evicted idle sessions");
                }
            }
        })
    }
}
