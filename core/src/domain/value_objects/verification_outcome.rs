//! Result of checking a submitted code with the provider.

use serde::{Deserialize, Serialize};

/// Verdict returned by a successful `check_code` call
///
/// Transport failures are not an outcome; providers report them as
/// [`crate::errors::ProviderError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The code matches the pending verification
    Approved,
    /// Wrong or expired code
    Rejected,
    /// The provider answered with an error instead of a verdict
    ProviderError { message: String },
}

impl VerificationOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, VerificationOutcome::Approved)
    }
}
