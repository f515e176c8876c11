//! Two-step phone verification strategy
//!
//! Each inbound request runs one transition:
//! - read the session and derive a [`VerificationState`]
//! - map state and form input to an [`Effect`] with the pure [`decide`]
//! - run the effect against the provider and user resolver
//! - write the session and report an [`AuthOutcome`]

mod config;
mod machine;
mod resolver;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::StrategyConfig;
pub use machine::{decide, evaluate_check, Effect, TransitionInput, VerificationState};
pub use resolver::UserResolver;
pub use service::PhoneStrategy;
pub use types::{AuthOutcome, LoginState};
