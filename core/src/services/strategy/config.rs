//! Configuration for the verification strategy

use pa_shared::AuthConfig;

use crate::services::session::SessionKeys;

/// Redirect targets and session keys for one strategy instance
#[derive(Debug, Clone, Default)]
pub struct StrategyConfig {
    /// Target after a code is sent or accepted; required for any transition
    pub success_redirect: Option<String>,
    /// Target after a recoverable failure; without it failures are returned
    pub failure_redirect: Option<String>,
    /// Session entry names
    pub session_keys: SessionKeys,
}

impl StrategyConfig {
    pub fn new(success_redirect: impl Into<String>) -> Self {
        Self {
            success_redirect: Some(success_redirect.into()),
            ..Default::default()
        }
    }

    pub fn with_success_redirect(mut self, target: impl Into<String>) -> Self {
        self.success_redirect = Some(target.into());
        self
    }

    pub fn with_failure_redirect(mut self, target: impl Into<String>) -> Self {
        self.failure_redirect = Some(target.into());
        self
    }

    pub fn with_session_keys(mut self, keys: SessionKeys) -> Self {
        self.session_keys = keys;
        self
    }
}

impl From<&AuthConfig> for StrategyConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            success_redirect: config.success_redirect.clone(),
            failure_redirect: config.failure_redirect.clone(),
            session_keys: SessionKeys::default(),
        }
    }
}
