//! Value objects representing immutable domain concepts.

pub mod phone_identifier;
pub mod verification_outcome;

// Re-export commonly used types
pub use phone_identifier::PhoneIdentifier;
pub use verification_outcome::VerificationOutcome;
