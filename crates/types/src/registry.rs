//! Account blocks and the multi-account registry

use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};

/// One account's configuration: an ordered mapping of opaque settings
pub type ConfigBlock = Map<String, Value>;

/// Key naming the account a block belongs to
pub const ACCOUNT_NAME_KEY: &str = "account_name";

/// Key holding the AWS account id of a block
pub const ACCOUNT_ID_KEY: &str = "account_id";

/// The list of account blocks read from a multi-account YAML document.
///
/// Only used while loading: it resolves which block becomes a configuration,
/// or produces the name to id listing. Nothing here is schema-validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRegistry {
    blocks: Vec<ConfigBlock>,
}

impl AccountRegistry {
    /// Parse a YAML document whose root is a sequence of mappings.
    ///
    /// Merge keys (`<<: *defaults`) are expanded before the blocks are read,
    /// with a block's own keys taking precedence over merged ones.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut document: serde_yaml::Value = serde_yaml::from_str(content)?;
        document.apply_merge()?;
        let blocks: Vec<ConfigBlock> = serde_yaml::from_value(document)?;
        Ok(Self { blocks })
    }

    pub fn from_blocks(blocks: Vec<ConfigBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[ConfigBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find the first block whose `account_name` equals `name`.
    ///
    /// Blocks are scanned in file order, so with duplicate names the earliest
    /// one wins. A block without a string `account_name` is an error.
    pub fn find_account(&self, name: &str) -> Result<Option<&ConfigBlock>> {
        Ok(self.position_of(name)?.map(|index| &self.blocks[index]))
    }

    /// Consuming variant of [`find_account`](Self::find_account)
    pub fn into_account(self, name: &str) -> Result<Option<ConfigBlock>> {
        let position = self.position_of(name)?;
        Ok(position.and_then(|index| self.blocks.into_iter().nth(index)))
    }

    /// Map every `account_name` to its `account_id`.
    ///
    /// Later blocks overwrite earlier ones sharing a name.
    pub fn account_ids(&self) -> Result<Map<String, Value>> {
        let mut accounts = Map::new();
        for (index, block) in self.blocks.iter().enumerate() {
            let name = required_str(block, index, ACCOUNT_NAME_KEY)?;
            let id = block
                .get(ACCOUNT_ID_KEY)
                .ok_or_else(|| missing(index, ACCOUNT_ID_KEY))?;
            accounts.insert(name.to_string(), id.clone());
        }
        Ok(accounts)
    }

    fn position_of(&self, name: &str) -> Result<Option<usize>> {
        for (index, block) in self.blocks.iter().enumerate() {
            if required_str(block, index, ACCOUNT_NAME_KEY)? == name {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

fn required_str<'a>(block: &'a ConfigBlock, index: usize, field: &str) -> Result<&'a str> {
    block
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(index, field))
}

fn missing(index: usize, field: &str) -> ConfigError {
    ConfigError::MissingField {
        index,
        field: field.to_string(),
    }
}
