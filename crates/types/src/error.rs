//! Error types for the policygen configuration layer

use std::path::PathBuf;
use thiserror::Error;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML, or not a list of mappings
    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),

    /// An account block does not satisfy the configuration schema
    #[error("Configuration schema violation: {message}")]
    Schema { message: String },

    /// The first configured region is not us-east-1
    #[error("ERROR: the first configured region must be us-east-1")]
    RegionOrder { found: String },

    /// No block in the registry carries the requested account name
    #[error("ERROR: No account with name \"{}\" in {}", .name, .path.display())]
    AccountNotFound { name: String, path: PathBuf },

    /// Lookup of a key the configuration does not define
    #[error("Configuration has no attribute '{key}'")]
    UnknownKey { key: String },

    /// A registry block lacks a field every account block must carry
    #[error("Account block {index} is missing required field: {field}")]
    MissingField { index: usize, field: String },

    /// A %%POLICYGEN_ENV_*%% placeholder names an unset variable
    #[error("Environment variable {name} referenced by configuration is not set")]
    MissingEnvVar { name: String },

    /// Environment placeholders keep expanding into further placeholders
    #[error("Environment placeholder {name} is still unresolved after {depth} expansions")]
    UnresolvedEnvPlaceholder { name: String, depth: usize },

    /// Two keys of one mapping become identical after substitution
    #[error("Substituted key '{key}' collides with another key in the same mapping")]
    KeyCollision { key: String },
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
