//! Caller hook turning a verified phone into a principal

use async_trait::async_trait;

use crate::domain::{AuthRequest, FormData, PhoneIdentifier};
use crate::errors::BoxError;

/// Looks up or creates the principal for a phone that passed verification
///
/// Errors are surfaced to the user through the failure transition with
/// their own message.
#[async_trait]
pub trait UserResolver<U>: Send + Sync {
    async fn resolve(
        &self,
        phone: &PhoneIdentifier,
        form: &FormData,
        request: &AuthRequest,
    ) -> Result<U, BoxError>;
}
