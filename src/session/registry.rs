use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::state::SessionState;
use crate::errors::AppError;

struct Entry {
    state: Arc<Mutex<SessionState>>,
    last_used: Instant,
}

/// Live sessions by id. Each session sits behind its own lock so one user's
/// slow plan fetch never blocks another user. A session idle for longer than
/// `idle_ttl` ends on its own and is swept on the next `create` or `get`.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, now);
        sessions.insert(
            id,
            Entry {
                state: Arc::new(Mutex::new(SessionState::default())),
                last_used: now,
            },
        );
        debug!(session_id = %id, live = sessions.len(), "session created");
        id
    }

    /// Looks the session up and marks it as used.
    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<SessionState>>, AppError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, now);
        let entry = sessions.get_mut(&id).ok_or(AppError::SessionNotFound)?;
        entry.last_used = now;
        Ok(entry.state.clone())
    }

    pub async fn end(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    #[cfg(test)]
    pub async fn live(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn sweep(&self, sessions: &mut HashMap<Uuid, Entry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, e| now.duration_since(e.last_used) <= self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            debug!(expired, "idle sessions dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::Stage;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = SessionRegistry::new(HOUR);
        let a = registry.create().await;
        let b = registry.create().await;
        assert_ne!(a, b);

        registry.get(a).await.unwrap().lock().await.stage = Stage::ConsentGiven;
        assert_eq!(registry.get(b).await.unwrap().lock().await.stage, Stage::Fresh);
        assert_eq!(registry.get(a).await.unwrap().lock().await.stage, Stage::ConsentGiven);
    }

    #[tokio::test]
    async fn unknown_or_ended_session_is_not_found() {
        let registry = SessionRegistry::new(HOUR);
        assert!(matches!(
            registry.get(Uuid::new_v4()).await,
            Err(AppError::SessionNotFound)
        ));

        let id = registry.create().await;
        assert!(registry.end(id).await);
        assert!(!registry.end(id).await);
        assert!(matches!(registry.get(id).await, Err(AppError::SessionNotFound)));
    }

    #[tokio::test]
    async fn idle_session_expires() {
        let registry = SessionRegistry::new(Duration::from_millis(20));
        let id = registry.create().await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(matches!(registry.get(id).await, Err(AppError::SessionNotFound)));
        assert_eq!(registry.live().await, 0);
    }

    #[tokio::test]
    async fn abandoned_sessions_are_swept_on_create() {
        let registry = SessionRegistry::new(Duration::from_millis(20));
        for _ in 0..100 {
            registry.create().await;
        }
        tokio::time::sleep(Duration::from_millis(60)).await;

        let fresh = registry.create().await;
        assert_eq!(registry.live().await, 1);
        assert!(registry.get(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn use_keeps_session_alive() {
        let registry = SessionRegistry::new(Duration::from_millis(200));
        let id = registry.create().await;
        for _ in 0..4 {
            tokio::time::sleep(Duration::from_millis(80)).await;
            assert!(registry.get(id).await.is_ok());
        }
    }
}
