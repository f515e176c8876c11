//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern is valid")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a string is already a canonical E.164 number
pub fn is_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs and display (e.g., +1*******4567)
///
/// Keeps the leading `+` with the first digit and the last four digits.
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() < 7 {
        return "****".to_string();
    }

    let head = if normalized.starts_with('+') { 2 } else { 1 };
    let tail = normalized.len() - 4;
    format!(
        "{}{}{}",
        &normalized[..head],
        "*".repeat(tail - head),
        &normalized[tail..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("555-123-4567"), "5551234567");
        assert_eq!(normalize_phone_number("+1 (555) 123 4567"), "+15551234567");
    }

    #[test]
    fn test_is_e164() {
        assert!(is_e164("+15551234567"));
        assert!(is_e164("+442071838750"));
        assert!(!is_e164("15551234567")); // Missing +
        assert!(!is_e164("+0123456789")); // Invalid country code
        assert!(!is_e164("+12345")); // Too short
        assert!(!is_e164("+1234567890123456")); // Too long
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+15551234567"), "+1******4567");
        assert_eq!(mask_phone_number("5551234567"), "5*****4567");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
