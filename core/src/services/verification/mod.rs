//! Verification provider capability
//!
//! The provider owns code generation, delivery and validation. The strategy
//! only asks it to send a code and later to judge a submitted one.

mod traits;

pub use traits::VerificationProvider;
