//! Session kept entirely inside a sealed cookie

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pa_core::domain::{AuthRequest, Session, SessionData};
use pa_core::errors::SessionError;
use pa_core::services::{CookieOptions, SessionStore};
use pa_shared::SessionConfig;

use super::seal::CookieSealer;

/// Browsers drop cookies larger than this
pub const MAX_COOKIE_BYTES: usize = 4096;

/// Sealed payload; `exp` bounds replay of an old cookie
#[derive(Debug, Serialize, Deserialize)]
struct CookiePayload {
    exp: i64,
    #[serde(default)]
    data: SessionData,
}

/// Cookie-only [`SessionStore`]
///
/// The whole session travels in an AES-GCM sealed cookie, so nothing is kept
/// server-side. A cookie that fails to open, has expired or does not parse is
/// treated as no session at all.
#[derive(Clone)]
pub struct CookieSessionStore {
    sealer: CookieSealer,
    options: CookieOptions,
    ttl: Duration,
}

impl CookieSessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sealer: CookieSealer::new(&config.secret),
            options: CookieOptions::from_config(config),
            ttl: Duration::seconds(config.max_age_secs() as i64),
        }
    }

    /// Override how long a sealed payload stays valid
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn options(&self) -> &CookieOptions {
        &self.options
    }

    fn open(&self, value: &str) -> Option<SessionData> {
        let plaintext = match self.sealer.open(value) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(error = %e, "Discarding session cookie that failed to open");
                return None;
            }
        };

        let payload: CookiePayload = match serde_json::from_slice(&plaintext) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session cookie");
                return None;
            }
        };

        if payload.exp <= Utc::now().timestamp() {
            debug!("Session cookie expired");
            return None;
        }

        Some(payload.data)
    }
}

#[async_trait]
impl SessionStore for CookieSessionStore {
    async fn get(&self, request: &AuthRequest) -> Result<Session, SessionError> {
        let data = request
            .cookie(&self.options.name)
            .and_then(|value| self.open(value))
            .unwrap_or_default();

        Ok(Session::from_data(None, data))
    }

    async fn persist(&self, session: &Session) -> Result<String, SessionError> {
        if session.is_empty() {
            return Ok(self.options.expired_header());
        }

        let payload = CookiePayload {
            exp: (Utc::now() + self.ttl).timestamp(),
            data: session.data().clone(),
        };
        let json = serde_json::to_vec(&payload)?;
        let sealed = self
            .sealer
            .seal(&json)
            .map_err(|e| SessionError::Backend(e.to_string()))?;

        let header = self.options.to_header(&sealed);
        if header.len() > MAX_COOKIE_BYTES {
            return Err(SessionError::Backend(format!(
                "session cookie is {} bytes, limit is {}",
                header.len(),
                MAX_COOKIE_BYTES
            )));
        }

        Ok(header)
    }

    async fn destroy(&self, _session: &Session) -> Result<String, SessionError> {
        Ok(self.options.expired_header())
    }
}
