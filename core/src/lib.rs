//! # Phone Auth Core
//!
//! Two-step phone number authentication: a visitor submits a phone number,
//! receives a one-time code from an external verification provider, and
//! submits the code to obtain an authenticated session.
//!
//! This crate contains the domain types, the error taxonomy, the capability
//! traits for providers and session stores, and the verification state
//! machine driving each request.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
