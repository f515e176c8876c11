//! Types for strategy results

use serde::Serialize;

use crate::errors::{FailureKind, StrategyError};

/// What the caller should do with the response
#[derive(Debug)]
pub enum AuthOutcome<U> {
    /// Send the browser to `target` with the updated session cookie
    Redirect { target: String, cookie: String },
    /// The session already holds a principal
    Authenticated { principal: U },
    /// A recoverable failure with no failure redirect configured
    Failed { error: StrategyError, cookie: String },
}

impl<U> AuthOutcome<U> {
    /// `Set-Cookie` value to send, if the transition wrote the session
    pub fn cookie(&self) -> Option<&str> {
        match self {
            AuthOutcome::Redirect { cookie, .. } | AuthOutcome::Failed { cookie, .. } => {
                Some(cookie)
            }
            AuthOutcome::Authenticated { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            AuthOutcome::Failed { error, .. } => error.kind(),
            _ => None,
        }
    }
}

/// Data a login page needs: the flashed pending phone and last error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginState {
    /// Phone a code was just sent to
    pub pending_phone: Option<String>,
    /// Message of the last failure
    pub error: Option<String>,
    /// Updated session cookie; reading consumed the flashes
    #[serde(skip)]
    pub cookie: String,
}
