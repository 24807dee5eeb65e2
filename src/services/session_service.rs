// src/services/session_service.rs
//
// Session Store - per-user navigation state
//
// PRINCIPLES:
// - One context per user; entering any view replaces the previous one
// - Navigation only touches the context of the matching kind
// - Contexts are snapshots: navigating never re-fetches
// - Idle sessions are evicted by a background sweeper
//
// Callers get clones of the stored context. Clones share the dataset, so
// handing one out is cheap and rendering never holds the lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::navigation::{ContextKind, NavAction, NavigationContext};
use crate::domain::UserId;

pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct Session {
    pub owner: UserId,
    pub context: NavigationContext,
    pub last_touched: Instant,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, Session>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Start a new view for the user, discarding whatever they had open
    pub async fn enter(&self, user_id: UserId, context: NavigationContext) -> NavigationContext {
        let session = Session {
            owner: user_id,
            context: context.clone(),
            last_touched: Instant::now(),
        };
        self.sessions.write().await.insert(user_id, session);
        context
    }

    /// Apply a navigation event. `None` when the user has no open view of
    /// that kind (expired, or they moved on to another view).
    pub async fn navigate(&self, user_id: UserId, action: NavAction) -> Option<NavigationContext> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&user_id)?;

        if session.context.kind() != action.kind {
            debug!(
                "User {} pressed {} while in {}",
                user_id,
                action,
                session.context.kind().as_str()
            );
            return None;
        }

        session.context.step(action.direction);
        session.last_touched = Instant::now();
        Some(session.context.clone())
    }

    pub async fn get(&self, user_id: UserId) -> Option<NavigationContext> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .map(|session| session.context.clone())
    }

    pub async fn active_kind(&self, user_id: UserId) -> Option<ContextKind> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .map(|session| session.context.kind())
    }

    pub async fn discard(&self, user_id: UserId) -> bool {
        self.sessions.write().await.remove(&user_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle for longer than the timeout as of `now`.
    /// Returns how many were dropped.
    pub async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now.saturating_duration_since(session.last_touched) <= self.idle_timeout);
        before - sessions.len()
    }

    /// Periodically evict idle sessions until the runtime shuts down
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = self.evict_idle_at(Instant::now()).await;
                if evicted > 0 {
                    debug!("Evicted {} idle sessions", evicted);
                }
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE)
    }
}
