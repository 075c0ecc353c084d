//! The validated configuration of a single account

use crate::loader::ConfigLoader;
use crate::schema::REGIONS_KEY;
use crate::substitution::{insert_unique, Substitution};
use crate::validation::ConfigValidator;
use policygen_types::{ConfigBlock, ConfigError, Result, ACCOUNT_ID_KEY, ACCOUNT_NAME_KEY};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key under which a block may carry its own path; never kept in the mapping
const CONFIG_PATH_KEY: &str = "config_path";

/// Validated configuration for one account.
///
/// Holds the account block and the path it was loaded from. Instances are
/// immutable: [`config_for_region`](Self::config_for_region) returns a new
/// configuration. Serializes as the bare mapping, without the path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PolicygenConfig {
    config: ConfigBlock,
    #[serde(skip)]
    config_path: PathBuf,
}

impl PolicygenConfig {
    /// Validate `config` and wrap it together with the path it came from
    pub fn new(mut config: ConfigBlock, config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        if config.shift_remove(CONFIG_PATH_KEY).is_some() {
            warn!(
                "Ignoring config_path key inside account block; using {}",
                config_path.display()
            );
        }

        debug!("Validating configuration...");
        ConfigValidator::validate(&config)?;

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Load the block named `account_name` from the registry at `path`
    pub fn from_file<P: AsRef<Path>>(path: P, account_name: &str) -> Result<Self> {
        ConfigLoader::load(path, account_name)
    }

    /// Map every account name in the registry at `path` to its account id
    pub fn list_accounts<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
        ConfigLoader::list_accounts(path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Look up a configuration key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Look up a configuration key, failing if the configuration lacks it
    pub fn value(&self, key: &str) -> Result<&Value> {
        self.config.get(key).ok_or_else(|| ConfigError::UnknownKey {
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.config.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.config.keys().map(String::as_str)
    }

    /// Configured regions, in order. The first is always us-east-1.
    pub fn regions(&self) -> Vec<&str> {
        self.config
            .get(REGIONS_KEY)
            .and_then(Value::as_array)
            .map(|regions| regions.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn account_name(&self) -> Option<&str> {
        self.config.get(ACCOUNT_NAME_KEY).and_then(Value::as_str)
    }

    pub fn account_id(&self) -> Option<&Value> {
        self.config.get(ACCOUNT_ID_KEY)
    }

    pub fn as_map(&self) -> &ConfigBlock {
        &self.config
    }

    pub fn into_map(self) -> ConfigBlock {
        self.config
    }

    /// Derive the configuration for `region`, reading `%%POLICYGEN_ENV_*%%`
    /// placeholders from the process environment.
    pub fn config_for_region(&self, region: &str) -> Result<Self> {
        self.config_for_region_with(region, |name| std::env::var(name).ok())
    }

    /// Derive the configuration for `region` with an explicit variable lookup.
    ///
    /// The `regions` list is copied unchanged; every other value goes through
    /// [`Substitution`]. A key that becomes equal to another key, `regions`
    /// included, is an error. The result is validated like a freshly loaded
    /// block.
    pub fn config_for_region_with<F>(&self, region: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let substitution = Substitution::new(region, &lookup);
        let mut derived = Map::new();

        for (key, value) in &self.config {
            if key == REGIONS_KEY {
                insert_unique(&mut derived, key.clone(), value.clone())?;
            } else {
                insert_unique(
                    &mut derived,
                    substitution.apply_str(key)?,
                    substitution.apply(value)?,
                )?;
            }
        }

        Self::new(derived, self.config_path.clone())
    }

    /// Derive one configuration per configured region, in configured order
    pub fn region_configs(&self) -> Result<Vec<(String, Self)>> {
        self.regions()
            .into_iter()
            .map(|region| Ok((region.to_string(), self.config_for_region(region)?)))
            .collect()
    }
}
