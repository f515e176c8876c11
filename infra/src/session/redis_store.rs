//! Redis-backed session store
//!
//! Sessions live under `{prefix}:session:{id}` with the cookie max-age as TTL,
//! so several API instances can share them.

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use pa_core::domain::{AuthRequest, Session, SessionData};
use pa_core::errors::SessionError;
use pa_core::services::{CookieOptions, SessionStore};
use pa_shared::SessionConfig;

use crate::cache::RedisClient;

#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    options: CookieOptions,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, config: &SessionConfig) -> Self {
        Self {
            client,
            options: CookieOptions::from_config(config),
            ttl_secs: config.max_age_secs(),
        }
    }

    fn key(&self, id: &str) -> String {
        self.client.key(&format!("session:{}", id))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, request: &AuthRequest) -> Result<Session, SessionError> {
        let Some(id) = request
            .cookie(&self.options.name)
            .filter(|id| Uuid::parse_str(id).is_ok())
        else {
            return Ok(Session::new());
        };

        let Some(json) = self.client.get(&self.key(id)).await? else {
            return Ok(Session::new());
        };

        match serde_json::from_str::<SessionData>(&json) {
            Ok(data) => Ok(Session::from_data(Some(id.to_string()), data)),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                Ok(Session::new())
            }
        }
    }

    async fn persist(&self, session: &Session) -> Result<String, SessionError> {
        if session.is_empty() {
            if let Some(id) = session.id() {
                self.client.delete(&self.key(id)).await?;
            }
            return Ok(self.options.expired_header());
        }

        let id = session
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let json = serde_json::to_string(session.data())?;

        self.client
            .set_with_expiry(&self.key(&id), &json, self.ttl_secs)
            .await?;

        Ok(self.options.to_header(&id))
    }

    async fn destroy(&self, session: &Session) -> Result<String, SessionError> {
        if let Some(id) = session.id() {
            self.client.delete(&self.key(id)).await?;
        }
        Ok(self.options.expired_header())
    }
}
