//! Domain layer containing the request, session and verification value types.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{AuthRequest, FormData, Session, SessionData, CODE_FIELD, PHONE_FIELD};
pub use value_objects::{PhoneIdentifier, VerificationOutcome};
