//! Mock implementations for testing the verification strategy

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{AuthRequest, FormData, PhoneIdentifier, Session, SessionData, VerificationOutcome};
use crate::errors::{BoxError, ProviderError, SessionError};
use crate::services::session::SessionStore;
use crate::services::strategy::UserResolver;
use crate::services::verification::VerificationProvider;

pub const COOKIE_NAME: &str = "test_session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestUser {
    pub id: u64,
    pub phone: String,
}

// Mock verification provider for testing
pub struct MockVerificationProvider {
    pub requested: Arc<Mutex<Vec<String>>>,
    pub checked: Arc<Mutex<Vec<(String, String)>>>,
    pub outcome: VerificationOutcome,
    pub should_fail: bool,
}

impl MockVerificationProvider {
    pub fn new(outcome: VerificationOutcome) -> Self {
        Self {
            requested: Arc::new(Mutex::new(Vec::new())),
            checked: Arc::new(Mutex::new(Vec::new())),
            outcome,
            should_fail: false,
        }
    }

    pub fn approving() -> Self {
        Self::new(VerificationOutcome::Approved)
    }

    pub fn rejecting() -> Self {
        Self::new(VerificationOutcome::Rejected)
    }

    pub fn unreachable() -> Self {
        Self {
            should_fail: true,
            ..Self::approving()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn check_count(&self) -> usize {
        self.checked.lock().unwrap().len()
    }

    pub fn call_count(&self) -> usize {
        self.request_count() + self.check_count()
    }
}

#[async_trait]
impl VerificationProvider for MockVerificationProvider {
    async fn request_code(&self, phone: &PhoneIdentifier) -> Result<(), ProviderError> {
        self.requested.lock().unwrap().push(phone.to_string());
        if self.should_fail {
            return Err(ProviderError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    async fn check_code(
        &self,
        phone: &PhoneIdentifier,
        code: &str,
    ) -> Result<VerificationOutcome, ProviderError> {
        self.checked
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        if self.should_fail {
            return Err(ProviderError::Transport("connection refused".to_string()));
        }
        Ok(self.outcome.clone())
    }
}

// Session store keeping data in a map keyed by the cookie value
pub struct MockSessionStore {
    pub sessions: Arc<Mutex<HashMap<String, SessionData>>>,
    pub next_id: AtomicUsize,
    pub should_fail: bool,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicUsize::new(1),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Seed a session and return the `Cookie` header that selects it
    pub fn seed(&self, id: &str, session: Session) -> String {
        self.sessions
            .lock()
            .unwrap()
            .insert(id.to_string(), session.data().clone());
        format!("{}={}", COOKIE_NAME, id)
    }

    /// Stored session behind a `Set-Cookie` header value
    pub fn stored(&self, set_cookie: &str) -> Session {
        let id = session_id(set_cookie);
        let data = self
            .sessions
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default();
        Session::from_data(Some(id), data)
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn get(&self, request: &AuthRequest) -> Result<Session, SessionError> {
        if self.should_fail {
            return Err(SessionError::Backend("store offline".to_string()));
        }
        let Some(id) = request.cookie(COOKIE_NAME) else {
            return Ok(Session::new());
        };
        let data = self.sessions.lock().unwrap().get(id).cloned();
        Ok(match data {
            Some(data) => Session::from_data(Some(id.to_string()), data),
            None => Session::new(),
        })
    }

    async fn persist(&self, session: &Session) -> Result<String, SessionError> {
        let id = match session.id() {
            Some(id) => id.to_string(),
            None => format!("sid-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        self.sessions
            .lock()
            .unwrap()
            .insert(id.clone(), session.data().clone());
        Ok(format!("{}={}; Path=/", COOKIE_NAME, id))
    }

    async fn destroy(&self, session: &Session) -> Result<String, SessionError> {
        if let Some(id) = session.id() {
            self.sessions.lock().unwrap().remove(id);
        }
        Ok(format!("{}=; Path=/; Max-Age=0", COOKIE_NAME))
    }
}

// Resolver returning a fixed user or a fixed error
pub struct MockResolver {
    pub user_id: u64,
    pub error: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    pub fn returning(user_id: u64) -> Self {
        Self {
            user_id,
            error: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::returning(0)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UserResolver<TestUser> for MockResolver {
    async fn resolve(
        &self,
        phone: &PhoneIdentifier,
        _form: &FormData,
        _request: &AuthRequest,
    ) -> Result<TestUser, BoxError> {
        self.calls.lock().unwrap().push(phone.to_string());
        if let Some(message) = &self.error {
            return Err(message.clone().into());
        }
        Ok(TestUser {
            id: self.user_id,
            phone: phone.to_string(),
        })
    }
}

/// `name=value` part of a `Set-Cookie` header, usable as a `Cookie` header
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

fn session_id(set_cookie: &str) -> String {
    cookie_pair(set_cookie)
        .split_once('=')
        .map(|(_, id)| id.to_string())
        .unwrap_or_default()
}

/// Build a request from form pairs and an optional `Cookie` header
pub fn request(fields: &[(&str, &str)], cookie: Option<&str>) -> AuthRequest {
    let form: FormData = fields.iter().copied().collect();
    let request = AuthRequest::new(form);
    match cookie {
        Some(cookie) => request.with_cookie_header(cookie),
        None => request,
    }
}
