//! [`PhoneFormatter`] that rejects numbers libphonenumber considers invalid
//!
//! Numbers without a leading `+` are read in the configured region.

use phonenumber::{country, Mode};
use tracing::debug;

use pa_core::domain::PhoneIdentifier;
use pa_core::errors::PhoneFormatError;
use pa_core::services::PhoneFormatter;
use pa_shared::phone::mask_phone_number;

use crate::InfrastructureError;

#[derive(Debug, Clone, Default)]
pub struct StrictPhoneFormatter {
    region: Option<country::Id>,
}

impl StrictPhoneFormatter {
    /// Only numbers in international format are accepted
    pub fn international_only() -> Self {
        Self { region: None }
    }

    /// Read national numbers in `region`, an ISO 3166 code such as `US`
    pub fn for_region(region: &str) -> Result<Self, InfrastructureError> {
        let id = region
            .trim()
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map_err(|_| InfrastructureError::Config(format!("Unknown phone region '{}'", region)))?;

        Ok(Self { region: Some(id) })
    }
}

impl PhoneFormatter for StrictPhoneFormatter {
    fn format(&self, raw: &str) -> Result<PhoneIdentifier, PhoneFormatError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PhoneFormatError::Empty);
        }

        let region = if raw.starts_with('+') { None } else { self.region };
        let parsed = phonenumber::parse(region, raw).map_err(|e| PhoneFormatError::Unparseable {
            reason: e.to_string(),
        })?;

        if !phonenumber::is_valid(&parsed) {
            debug!(phone = %mask_phone_number(raw), "Rejected invalid phone number");
            return Err(PhoneFormatError::Unparseable {
                reason: "not a valid number for its region".to_string(),
            });
        }

        PhoneIdentifier::parse(parsed.format().mode(Mode::E164).to_string())
    }
}
