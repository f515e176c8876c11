//! Session keys used by the strategy

use serde::{Deserialize, Serialize};

/// Names of the three session entries the strategy reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKeys {
    /// Authenticated principal
    pub principal: String,
    /// Flashed phone a code was sent to
    pub pending_phone: String,
    /// Flashed message of the last failure
    pub error: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            principal: "user".to_string(),
            pending_phone: "phone-auth:phone".to_string(),
            error: "phone-auth:error".to_string(),
        }
    }
}
