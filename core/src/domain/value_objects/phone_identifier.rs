//! Canonical phone identifier shared by the request and check steps.

use pa_shared::phone::{is_e164, mask_phone_number};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PhoneFormatError;

/// A phone number in E.164 form (`+15551234567`)
///
/// Only formatters construct it; every provider call within a transition
/// uses the same value verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneIdentifier(String);

impl PhoneIdentifier {
    /// Wrap an already canonical E.164 string
    pub fn parse(value: impl Into<String>) -> Result<Self, PhoneFormatError> {
        let value = value.into();
        if is_e164(&value) {
            Ok(Self(value))
        } else {
            Err(PhoneFormatError::NotE164 { value })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form safe for logs
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneIdentifier {
    type Error = PhoneFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhoneIdentifier> for String {
    fn from(phone: PhoneIdentifier) -> Self {
        phone.0
    }
}
