//! Configuration loader implementation

use crate::account::PolicygenConfig;
use policygen_types::{AccountRegistry, ConfigError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Reads multi-account YAML files and resolves account configurations
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the configuration of `account_name` from the file at `config_path`.
    ///
    /// The first block carrying that name wins. The returned configuration
    /// records `config_path` as the path it was loaded from.
    pub fn load<P: AsRef<Path>>(config_path: P, account_name: &str) -> Result<PolicygenConfig> {
        let config_path = config_path.as_ref();
        let registry = Self::read_registry(config_path)?;
        Self::select(registry, config_path, account_name)
    }

    /// Load an account configuration from an in-memory document
    pub fn load_from_str<P: AsRef<Path>>(
        yaml_content: &str,
        config_path: P,
        account_name: &str,
    ) -> Result<PolicygenConfig> {
        let registry = AccountRegistry::from_yaml_str(yaml_content)?;
        Self::select(registry, config_path.as_ref(), account_name)
    }

    /// Map every `account_name` in the file to its `account_id`.
    ///
    /// Blocks are not schema-validated here.
    pub fn list_accounts<P: AsRef<Path>>(config_path: P) -> Result<Map<String, Value>> {
        Self::read_registry(config_path.as_ref())?.account_ids()
    }

    fn read_registry(config_path: &Path) -> Result<AccountRegistry> {
        info!("Loading config from: {}", config_path.display());
        let content = std::fs::read_to_string(config_path)?;
        AccountRegistry::from_yaml_str(&content)
    }

    fn select(
        registry: AccountRegistry,
        config_path: &Path,
        account_name: &str,
    ) -> Result<PolicygenConfig> {
        let block = registry
            .into_account(account_name)?
            .ok_or_else(|| ConfigError::AccountNotFound {
                name: account_name.to_string(),
                path: config_path.to_path_buf(),
            })?;

        PolicygenConfig::new(block, config_path)
    }
}
