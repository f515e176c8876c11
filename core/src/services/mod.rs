//! Services implementing the verification flow.

pub mod phone;
pub mod session;
pub mod strategy;
pub mod verification;

// Re-export commonly used types
pub use phone::{DefaultPhoneFormatter, PhoneFormatter};
pub use session::{CookieOptions, SameSite, SessionKeys, SessionStore};
pub use strategy::{
    decide, AuthOutcome, Effect, LoginState, PhoneStrategy, StrategyConfig, TransitionInput,
    UserResolver, VerificationState,
};
pub use verification::VerificationProvider;
