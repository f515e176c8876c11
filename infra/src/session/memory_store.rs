//! In-process session store for development and single-instance deployments

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use pa_core::domain::{AuthRequest, Session, SessionData};
use pa_core::errors::SessionError;
use pa_core::services::{CookieOptions, SessionStore};
use pa_shared::SessionConfig;

#[derive(Debug, Clone)]
struct StoredSession {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// Server-side [`SessionStore`] keyed by a random session id cookie
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
    options: CookieOptions,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            options: CookieOptions::from_config(config),
            ttl: Duration::seconds(config.max_age_secs() as i64),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn cleanup_expired(&self) -> usize {
        purge_expired(&self.sessions).await
    }

    /// Spawn a task purging expired sessions every `interval`
    ///
    /// The task ends once every clone of the store has been dropped.
    pub fn start_cleanup_task(&self, interval: std::time::Duration) {
        let sessions: Weak<RwLock<HashMap<String, StoredSession>>> = Arc::downgrade(&self.sessions);

        tokio::spawn(async move {
            info!(
                interval_secs = interval.as_secs(),
                "In-memory session cleanup started"
            );
            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                let Some(sessions) = sessions.upgrade() else {
                    debug!("Session store dropped, stopping cleanup");
                    break;
                };
                purge_expired(&sessions).await;
            }
        });
    }
}

async fn purge_expired(sessions: &RwLock<HashMap<String, StoredSession>>) -> usize {
    let now = Utc::now();
    let mut sessions = sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, stored| stored.expires_at > now);
    let removed = before - sessions.len();
    if removed > 0 {
        debug!(removed, "Removed expired sessions");
    }
    removed
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, request: &AuthRequest) -> Result<Session, SessionError> {
        let Some(id) = request
            .cookie(&self.options.name)
            .filter(|id| Uuid::parse_str(id).is_ok())
        else {
            return Ok(Session::new());
        };

        let sessions = self.sessions.read().await;
        Ok(match sessions.get(id) {
            Some(stored) if stored.expires_at > Utc::now() => {
                Session::from_data(Some(id.to_string()), stored.data.clone())
            }
            _ => Session::new(),
        })
    }

    async fn persist(&self, session: &Session) -> Result<String, SessionError> {
        if session.is_empty() {
            if let Some(id) = session.id() {
                self.sessions.write().await.remove(id);
            }
            return Ok(self.options.expired_header());
        }

        let id = session
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.sessions.write().await.insert(
            id.clone(),
            StoredSession {
                data: session.data().clone(),
                expires_at: Utc::now() + self.ttl,
            },
        );

        Ok(self.options.to_header(&id))
    }

    async fn destroy(&self, session: &Session) -> Result<String, SessionError> {
        if let Some(id) = session.id() {
            self.sessions.write().await.remove(id);
        }
        Ok(self.options.expired_header())
    }
}
