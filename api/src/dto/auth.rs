use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

use pa_core::domain::{CODE_FIELD, PHONE_FIELD};
use pa_core::errors::StrategyError;

/// Login form fields the API bounds before handing the form to the strategy
///
/// Both fields stay optional here; a missing phone is reported by the
/// strategy itself so it reaches the login page as a flashed error.
/// Out-of-bounds fields are reported through [`LoginForm::rejection`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Raw phone as typed, national or international
    #[validate(length(max = 32))]
    pub phone: Option<String>,

    /// Code received by the user
    #[validate(length(max = 10))]
    pub code: Option<String>,
}

impl LoginForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            phone: fields.get(PHONE_FIELD).cloned(),
            code: fields.get(CODE_FIELD).cloned(),
        }
    }

    /// Strategy failure for a form that failed validation
    ///
    /// An overlong phone is an invalid phone number, anything else an invalid code.
    pub fn rejection(errors: &ValidationErrors) -> StrategyError {
        if errors.field_errors().contains_key(PHONE_FIELD) {
            StrategyError::InvalidPhoneNumber {
                reason: "too long".to_string(),
            }
        } else {
            StrategyError::InvalidCode
        }
    }
}

/// Body of `GET /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginStateResponse {
    pub pending_phone: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
