//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `pa_core`:
//! - **Verification**: Twilio Verify over HTTP and an in-process mock provider
//! - **Session**: sealed cookie, in-memory and Redis session stores
//! - **Phone**: `phonenumber`-backed strict formatter
//!
//! ## Features
//!
//! - `redis-cache`: Redis client and Redis-backed session store (default)
//! - `twilio-verify`: Twilio Verify provider (default)

use pa_core::errors::{ProviderError, SessionError};
use pa_shared::AppConfig;

/// Cache module - Redis client
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Phone parsing backed by libphonenumber metadata
pub mod phone;

/// Session stores
pub mod session;

/// Verification providers
pub mod verification;

pub use phone::{create_phone_formatter, StrictPhoneFormatter};
pub use session::{create_session_store, CookieSessionStore, MemorySessionStore};
pub use verification::{create_verification_provider, MockVerificationProvider};

#[cfg(feature = "redis-cache")]
pub use session::RedisSessionStore;
#[cfg(feature = "twilio-verify")]
pub use verification::{TwilioVerifyConfig, TwilioVerifyProvider};

/// Load application configuration from the environment
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    tracing::info!(
        environment = %config.environment,
        provider = %config.verification.provider,
        session_backend = ?config.session.backend,
        "Configuration loaded"
    );

    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cookie sealing or opening failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for ProviderError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => ProviderError::Configuration(message),
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

impl From<InfrastructureError> for SessionError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Serialization(e) => SessionError::Serialization(e),
            InfrastructureError::Crypto(_) => SessionError::Tampered,
            other => SessionError::Backend(other.to_string()),
        }
    }
}
