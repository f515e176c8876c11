//! Default raw-input to E.164 formatter

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::PhoneIdentifier;
use crate::errors::PhoneFormatError;

/// Digits with the punctuation people type around them, optionally `+` prefixed
static RAW_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[\d\s().\-/]+$").expect("raw phone pattern is valid")
});

/// North American Numbering Plan country code
const NANP_COUNTRY_CODE: &str = "1";

/// National significant number length inside the NANP
const NANP_NATIONAL_LENGTH: usize = 10;

/// Turns raw user input into a canonical [`PhoneIdentifier`]
///
/// Implementations must be pure: the same input always yields the same output.
pub trait PhoneFormatter: Send + Sync {
    fn format(&self, raw: &str) -> Result<PhoneIdentifier, PhoneFormatError>;
}

/// Regex-based formatter with a default country for national numbers
///
/// * `+` or `00` prefixed input is treated as international.
/// * Bare numbers get the default country code; a single trunk `0` is dropped.
/// * With the NANP default, 10 digits or `1` + 10 digits are accepted.
#[derive(Debug, Clone)]
pub struct DefaultPhoneFormatter {
    default_country_code: String,
}

impl Default for DefaultPhoneFormatter {
    fn default() -> Self {
        Self::new(NANP_COUNTRY_CODE)
    }
}

impl DefaultPhoneFormatter {
    /// Create a formatter for the given calling code (`"1"`, `"+44"`, ...)
    pub fn new(default_country_code: impl Into<String>) -> Self {
        let code: String = default_country_code.into();
        Self {
            default_country_code: code.trim_start_matches('+').to_string(),
        }
    }

    pub fn default_country_code(&self) -> &str {
        &self.default_country_code
    }

    fn national_to_e164(&self, digits: &str) -> Result<String, PhoneFormatError> {
        if self.default_country_code == NANP_COUNTRY_CODE {
            return match digits.len() {
                NANP_NATIONAL_LENGTH => Ok(format!("+1{}", digits)),
                11 if digits.starts_with('1') => Ok(format!("+{}", digits)),
                actual => Err(PhoneFormatError::InvalidLength {
                    expected: NANP_NATIONAL_LENGTH,
                    actual,
                }),
            };
        }

        let national = digits.strip_prefix('0').unwrap_or(digits);
        Ok(format!("+{}{}", self.default_country_code, national))
    }
}

impl PhoneFormatter for DefaultPhoneFormatter {
    fn format(&self, raw: &str) -> Result<PhoneIdentifier, PhoneFormatError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhoneFormatError::Empty);
        }
        if !RAW_PHONE_REGEX.is_match(trimmed) {
            return Err(PhoneFormatError::UnexpectedCharacters {
                input: trimmed.to_string(),
            });
        }

        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        let candidate = if trimmed.starts_with('+') {
            format!("+{}", digits)
        } else if let Some(international) = digits.strip_prefix("00") {
            format!("+{}", international)
        } else {
            self.national_to_e164(&digits)?
        };

        PhoneIdentifier::parse(candidate)
    }
}
