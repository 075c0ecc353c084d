//! Shared types for the policygen configuration layer
//!
//! This crate contains the account block representation, the transient
//! account registry read from a multi-account YAML file, and the error type
//! shared by the configuration crate.

pub mod error;
pub mod registry;

// Re-export commonly used types
pub use error::{ConfigError, Result};
pub use registry::{AccountRegistry, ConfigBlock, ACCOUNT_ID_KEY, ACCOUNT_NAME_KEY};
