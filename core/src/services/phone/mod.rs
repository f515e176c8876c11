//! Phone number normalization.

mod formatter;

pub use formatter::{DefaultPhoneFormatter, PhoneFormatter};
