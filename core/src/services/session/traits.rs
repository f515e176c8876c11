//! Trait for session storage integration

use async_trait::async_trait;

use crate::domain::{AuthRequest, Session};
use crate::errors::SessionError;

/// Reads and writes the cookie-backed session of one request/response cycle
///
/// Mutation happens on the [`Session`] handle (`set`, `flash`, `unset`);
/// the store only loads it and serializes it back.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session referenced by the request, or a fresh one
    async fn get(&self, request: &AuthRequest) -> Result<Session, SessionError>;

    /// Save the session and return the `Set-Cookie` header value
    async fn persist(&self, session: &Session) -> Result<String, SessionError>;

    /// End the session and return a `Set-Cookie` header value that clears it
    async fn destroy(&self, session: &Session) -> Result<String, SessionError>;
}
