//! Login flow and session cookie configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Redirect targets and phone defaults for the login flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Where to send the browser after a code is sent or accepted
    #[serde(default)]
    pub success_redirect: Option<String>,

    /// Where to send the browser after a recoverable failure
    #[serde(default)]
    pub failure_redirect: Option<String>,

    /// Country calling code prepended to national numbers (without '+')
    #[serde(default = "default_country_code")]
    pub default_country_code: String,

    /// Which formatter normalizes submitted phone numbers
    #[serde(default)]
    pub phone_formatter: PhoneFormatterKind,

    /// ISO 3166 region for national numbers with the strict formatter
    #[serde(default)]
    pub phone_region: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            success_redirect: None,
            failure_redirect: None,
            default_country_code: default_country_code(),
            phone_formatter: PhoneFormatterKind::default(),
            phone_region: None,
        }
    }
}

impl AuthConfig {
    /// Create a configuration with a success redirect
    pub fn new(success_redirect: impl Into<String>) -> Self {
        Self {
            success_redirect: Some(success_redirect.into()),
            ..Default::default()
        }
    }

    /// Set the failure redirect
    pub fn with_failure_redirect(mut self, target: impl Into<String>) -> Self {
        self.failure_redirect = Some(target.into());
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            success_redirect: non_empty_var("AUTH_SUCCESS_REDIRECT"),
            failure_redirect: non_empty_var("AUTH_FAILURE_REDIRECT"),
            default_country_code: env::var("PHONE_DEFAULT_COUNTRY_CODE")
                .map(|code| code.trim_start_matches('+').to_string())
                .unwrap_or_else(|_| default_country_code()),
            phone_formatter: env::var("PHONE_FORMATTER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            phone_region: non_empty_var("PHONE_REGION"),
        }
    }
}

/// Phone number formatter selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneFormatterKind {
    /// Digit cleanup with a default country code
    #[default]
    Default,
    /// libphonenumber validation
    Strict,
}

impl std::str::FromStr for PhoneFormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(PhoneFormatterKind::Default),
            "strict" => Ok(PhoneFormatterKind::Strict),
            _ => Err(format!("Invalid phone formatter: {}", s)),
        }
    }
}

/// Longest session lifetime accepted, in seconds (400 days)
pub const MAX_SESSION_AGE_SECS: u64 = 400 * 24 * 60 * 60;

/// Where session state lives between requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Whole session sealed inside the cookie
    Cookie,
    /// Process-local map keyed by a session id cookie
    Memory,
    /// Redis keyed by a session id cookie
    Redis,
}

impl Default for SessionBackend {
    fn default() -> Self {
        SessionBackend::Cookie
    }
}

impl std::str::FromStr for SessionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cookie" => Ok(SessionBackend::Cookie),
            "memory" => Ok(SessionBackend::Memory),
            "redis" => Ok(SessionBackend::Redis),
            _ => Err(format!("Invalid session backend: {}", s)),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session cookie name
    pub cookie_name: String,

    /// Session cookie path
    #[serde(default = "default_path")]
    pub path: String,

    /// Session lifetime in seconds
    pub max_age: u64,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: String,

    /// Session cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Secret used to seal cookie sessions
    #[serde(skip_serializing, default)]
    pub secret: String,

    /// Storage backend
    #[serde(default)]
    pub backend: SessionBackend,

    /// Seconds between purges of expired in-memory sessions
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("pa_session"),
            path: default_path(),
            max_age: 86400, // 1 day
            secure: false,  // Set to true in production
            same_site: String::from("Lax"),
            http_only: default_http_only(),
            secret: String::from("development-session-secret-change-me"),
            backend: SessionBackend::default(),
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            path: env::var("SESSION_COOKIE_PATH").unwrap_or(defaults.path),
            max_age: env::var("SESSION_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_age),
            secure: env::var("SESSION_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.secure),
            same_site: env::var("SESSION_SAME_SITE").unwrap_or(defaults.same_site),
            http_only: defaults.http_only,
            secret: env::var("SESSION_SECRET").unwrap_or(defaults.secret),
            backend: env::var("SESSION_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            cleanup_interval: env::var("SESSION_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Session lifetime capped at [`MAX_SESSION_AGE_SECS`]
    pub fn max_age_secs(&self) -> u64 {
        self.max_age.min(MAX_SESSION_AGE_SECS)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn default_country_code() -> String {
    String::from("1")
}

fn default_path() -> String {
    String::from("/")
}

fn default_http_only() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}
