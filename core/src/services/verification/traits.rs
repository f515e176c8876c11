//! Trait for one-time code provider integration

use async_trait::async_trait;

use crate::domain::{PhoneIdentifier, VerificationOutcome};
use crate::errors::ProviderError;

/// External service that issues and checks one-time codes
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Issue a new code to the phone; repeated calls issue new codes
    async fn request_code(&self, phone: &PhoneIdentifier) -> Result<(), ProviderError>;

    /// Judge a submitted code
    ///
    /// A wrong or expired code is `Ok(VerificationOutcome::Rejected)`; `Err` is
    /// reserved for transport failures.
    async fn check_code(
        &self,
        phone: &PhoneIdentifier,
        code: &str,
    ) -> Result<VerificationOutcome, ProviderError>;
}
