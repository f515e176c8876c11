//! Verification provider implementations
//!
//! - **Twilio Verify**: production provider speaking the Verify v2 REST API
//! - **Mock**: in-process provider that issues codes itself and logs them

use std::sync::Arc;

use pa_core::services::VerificationProvider;
use pa_shared::VerificationConfig;

use crate::InfrastructureError;

pub mod mock_provider;

#[cfg(feature = "twilio-verify")]
pub mod twilio_verify;

pub use mock_provider::MockVerificationProvider;

#[cfg(feature = "twilio-verify")]
pub use twilio_verify::{TwilioVerifyConfig, TwilioVerifyProvider};

#[cfg(test)]
mod tests;

/// Build the provider named by `config.provider`
///
/// Unknown names and incomplete credentials are configuration errors; there
/// is no fallback to the mock provider.
pub fn create_verification_provider(
    config: &VerificationConfig,
) -> Result<Arc<dyn VerificationProvider>, InfrastructureError> {
    match config.provider.to_ascii_lowercase().as_str() {
        "mock" => {
            tracing::warn!("Using mock verification provider, codes are logged and never sent");
            Ok(Arc::new(MockVerificationProvider::new()))
        }
        #[cfg(feature = "twilio-verify")]
        "twilio" => {
            let twilio_config = TwilioVerifyConfig::from_verification_config(config)?;
            Ok(Arc::new(TwilioVerifyProvider::new(twilio_config)?))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown verification provider '{}'",
            other
        ))),
    }
}
