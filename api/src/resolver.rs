//! Principal stored in the session after a successful verification

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pa_core::domain::{AuthRequest, FormData, PhoneIdentifier};
use pa_core::errors::BoxError;
use pa_core::services::UserResolver;

/// Signed-in user as kept in the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub phone: String,
    pub verified_at: DateTime<Utc>,
}

/// Turns every verified phone into a fresh principal
///
/// Deployments with a user table plug their own [`UserResolver`] in here.
#[derive(Debug, Clone, Default)]
pub struct PhonePrincipalResolver;

#[async_trait]
impl UserResolver<Principal> for PhonePrincipalResolver {
    async fn resolve(
        &self,
        phone: &PhoneIdentifier,
        _form: &FormData,
        _request: &AuthRequest,
    ) -> Result<Principal, BoxError> {
        Ok(Principal {
            id: Uuid::new_v4(),
            phone: phone.as_str().to_string(),
            verified_at: Utc::now(),
        })
    }
}
