//! Phone number formatting with full libphonenumber metadata

use std::sync::Arc;

use pa_core::services::{DefaultPhoneFormatter, PhoneFormatter};
use pa_shared::{AuthConfig, PhoneFormatterKind};

use crate::InfrastructureError;

pub mod strict_formatter;

pub use strict_formatter::StrictPhoneFormatter;

/// Build the formatter selected by `PHONE_FORMATTER`
///
/// The strict formatter reads national numbers in `PHONE_REGION` and only
/// accepts international input when no region is set.
pub fn create_phone_formatter(
    config: &AuthConfig,
) -> Result<Arc<dyn PhoneFormatter>, InfrastructureError> {
    match config.phone_formatter {
        PhoneFormatterKind::Default => Ok(Arc::new(DefaultPhoneFormatter::new(
            config.default_country_code.clone(),
        ))),
        PhoneFormatterKind::Strict => {
            let formatter = match config.phone_region.as_deref() {
                Some(region) => StrictPhoneFormatter::for_region(region)?,
                None => StrictPhoneFormatter::international_only(),
            };
            tracing::info!(region = ?config.phone_region, "Using strict phone formatter");
            Ok(Arc::new(formatter))
        }
    }
}
