//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Redirect targets and session cookie configuration
//! - `cache` - Redis connection configuration for server-side sessions
//! - `environment` - Environment detection
//! - `server` - HTTP server bind configuration
//! - `verification` - One-time code provider configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{
    AuthConfig, PhoneFormatterKind, SessionBackend, SessionConfig, MAX_SESSION_AGE_SECS,
};
pub use cache::CacheConfig;
pub use environment::Environment;
pub use server::ServerConfig;
pub use verification::{VerificationConfig, VerifyChannel};

/// Minimum session secret length accepted outside development
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Redirect targets for the login flow
    pub auth: AuthConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Verification provider configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Redis configuration (used by the redis session backend)
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            verification: VerificationConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            session: SessionConfig::from_env(),
            verification: VerificationConfig::from_env(),
            cache: CacheConfig::from_env(),
        }
    }

    /// Reject configurations that must never reach production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.success_redirect.is_none() {
            return Err(ConfigError::Missing("AUTH_SUCCESS_REDIRECT"));
        }
        if self.session.max_age == 0 || self.session.max_age > MAX_SESSION_AGE_SECS {
            return Err(ConfigError::Invalid {
                key: "SESSION_MAX_AGE",
                message: format!("must be between 1 and {} seconds", MAX_SESSION_AGE_SECS),
            });
        }

        if !self.environment.is_production() {
            return Ok(());
        }

        if self.session.secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "SESSION_SECRET",
                message: format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            });
        }
        if self.verification.is_mock() {
            return Err(ConfigError::Invalid {
                key: "VERIFY_PROVIDER",
                message: "mock provider is not allowed in production".to_string(),
            });
        }
        if !self.session.secure {
            return Err(ConfigError::Invalid {
                key: "SESSION_SECURE",
                message: "session cookie must be secure in production".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> AppConfig {
        AppConfig {
            environment: Environment::Production,
            auth: AuthConfig::new("/dashboard"),
            session: SessionConfig {
                secret: "x".repeat(MIN_SESSION_SECRET_LEN),
                secure: true,
                ..Default::default()
            },
            verification: VerificationConfig {
                provider: "twilio".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_development_defaults_validate() {
        let config = AppConfig {
            auth: AuthConfig::new("/"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_success_redirect_rejected() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing("AUTH_SUCCESS_REDIRECT"))
        );
    }

    #[test]
    fn test_session_max_age_bounds() {
        let mut config = AppConfig {
            auth: AuthConfig::new("/"),
            ..Default::default()
        };
        config.session.max_age = u64::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "SESSION_MAX_AGE", .. })
        ));

        config.session.max_age = 0;
        assert!(config.validate().is_err());

        config.session.max_age = MAX_SESSION_AGE_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_long_secret() {
        let mut config = production();
        assert!(config.validate().is_ok());

        config.session.secret = "short".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "SESSION_SECRET", .. })
        ));
    }

    #[test]
    fn test_production_rejects_mock_provider() {
        let mut config = production();
        config.verification.provider = "mock".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "VERIFY_PROVIDER", .. })
        ));
    }
}
