//! Account configuration for the policygen tool
//!
//! This crate loads a multi-account YAML file, validates the selected
//! account block against an embedded JSON Schema, and derives per-region
//! copies of the configuration by placeholder substitution.

pub mod account;
pub mod loader;
pub mod schema;
pub mod substitution;
pub mod validation;

pub use account::PolicygenConfig;
pub use loader::ConfigLoader;
pub use policygen_types::{AccountRegistry, ConfigBlock, ConfigError, Result};
pub use schema::{config_schema, REGIONS_KEY};
pub use substitution::{
    Substitution, ENV_PLACEHOLDER_PREFIX, MAX_ENV_EXPANSIONS, REGION_PLACEHOLDER,
};
pub use validation::{ConfigValidator, REQUIRED_FIRST_REGION};
