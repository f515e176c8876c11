//! Error types returned by the pluggable collaborators
//!
//! Providers, session stores and formatters each report failures with their
//! own narrow type; the strategy folds them into [`super::StrategyError`].

use thiserror::Error;

/// Failures reported by a verification provider implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider could not be reached or answered with a server error
    #[error("transport failure: {0}")]
    Transport(String),

    /// The provider refused the request (bad number, blocked channel, ...)
    #[error("request rejected by provider ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider is not usable with the current configuration
    #[error("provider misconfigured: {0}")]
    Configuration(String),
}

/// Failures reported by a session store implementation
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session cookie could not be authenticated")]
    Tampered,

    #[error("session backend error: {0}")]
    Backend(String),
}

/// Reasons a raw phone number cannot be normalized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneFormatError {
    #[error("phone number is empty")]
    Empty,

    #[error("phone number contains unexpected characters: {input}")]
    UnexpectedCharacters { input: String },

    #[error("phone number has {actual} digits, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("phone number is not a valid E.164 number: {value}")]
    NotE164 { value: String },

    #[error("phone number could not be parsed: {reason}")]
    Unparseable { reason: String },
}
