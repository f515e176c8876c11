//! Error taxonomy for the verification strategy.

mod types;


pub use types::{PhoneFormatError, ProviderError, SessionError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error returned by caller-supplied user resolution
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a single transition can fail with
#[derive(Error, Debug)]
pub enum StrategyError {
    /// The strategy was built without a success redirect
    #[error("Missing success redirect")]
    MissingSuccessRedirect,

    #[error("Missing phone number")]
    MissingPhoneNumber,

    #[error("Invalid phone number: {reason}")]
    InvalidPhoneNumber { reason: String },

    #[error("Invalid code, try again")]
    InvalidCode,

    /// Transport level failure talking to the provider
    #[error("Could not reach the verification service: {message}")]
    DeliveryFailed { message: String },

    /// The provider answered but reported an error instead of a verdict
    #[error("Verification service error: {message}")]
    ProviderRejected { message: String },

    /// Error raised by the user resolution callback, kept verbatim
    #[error(transparent)]
    UserResolution(BoxError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type StrategyResult<T> = Result<T, StrategyError>;

/// Flat discriminant of the failures that go through the failure transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    MissingPhoneNumber,
    InvalidPhoneNumber,
    InvalidCode,
    DeliveryFailed,
    ProviderRejected,
    UserResolution,
}

impl FailureKind {
    /// Stable machine code
    pub fn as_code(&self) -> &'static str {
        match self {
            FailureKind::MissingPhoneNumber => "MISSING_PHONE_NUMBER",
            FailureKind::InvalidPhoneNumber => "INVALID_PHONE_NUMBER",
            FailureKind::InvalidCode => "INVALID_CODE",
            FailureKind::DeliveryFailed => "DELIVERY_FAILED",
            FailureKind::ProviderRejected => "PROVIDER_REJECTED",
            FailureKind::UserResolution => "USER_RESOLUTION",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl StrategyError {
    /// Failure kind for recoverable errors, `None` for errors that always propagate
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            StrategyError::MissingPhoneNumber => Some(FailureKind::MissingPhoneNumber),
            StrategyError::InvalidPhoneNumber { .. } => Some(FailureKind::InvalidPhoneNumber),
            StrategyError::InvalidCode => Some(FailureKind::InvalidCode),
            StrategyError::DeliveryFailed { .. } => Some(FailureKind::DeliveryFailed),
            StrategyError::ProviderRejected { .. } => Some(FailureKind::ProviderRejected),
            StrategyError::UserResolution(_) => Some(FailureKind::UserResolution),
            StrategyError::MissingSuccessRedirect | StrategyError::Session(_) => None,
        }
    }

    /// Whether this error goes through the failure transition
    pub fn is_recoverable(&self) -> bool {
        self.kind().is_some()
    }

    /// Wrap a user resolution error
    pub fn user_resolution(error: impl Into<BoxError>) -> Self {
        StrategyError::UserResolution(error.into())
    }
}

impl From<ProviderError> for StrategyError {
    fn from(error: ProviderError) -> Self {
        StrategyError::DeliveryFailed {
            message: error.to_string(),
        }
    }
}

impl From<PhoneFormatError> for StrategyError {
    fn from(error: PhoneFormatError) -> Self {
        match error {
            PhoneFormatError::Empty => StrategyError::MissingPhoneNumber,
            other => StrategyError::InvalidPhoneNumber {
                reason: other.to_string(),
            },
        }
    }
}
