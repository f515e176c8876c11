//! Shared utilities and configuration types for the phone authentication server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Phone number display helpers (normalization, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, Environment, PhoneFormatterKind,
    ServerConfig, SessionBackend, SessionConfig, VerificationConfig, VerifyChannel,
};
pub use utils::phone;
