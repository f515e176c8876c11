//! Utility functions module

pub mod phone;
