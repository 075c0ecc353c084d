//! Placeholder substitution over configuration values
//!
//! Two placeholder families are recognized inside string values and mapping
//! keys:
//!
//! - `%%AWS_REGION%%` is replaced by the region being generated for.
//! - `%%POLICYGEN_ENV_<name>%%` is replaced by the value of the environment
//!   variable `POLICYGEN_ENV_<name>`.
//!
//! Environment placeholders are resolved first, so region placeholders inside
//! a variable's value are substituted as well. A variable's value may itself
//! hold environment placeholders; these are expanded too, up to
//! [`MAX_ENV_EXPANSIONS`] rounds.

use policygen_types::{ConfigError, Result};
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Token replaced by the target region
pub const REGION_PLACEHOLDER: &str = "%%AWS_REGION%%";

/// Prefix shared by the environment placeholder and the variables it reads
pub const ENV_PLACEHOLDER_PREFIX: &str = "POLICYGEN_ENV_";

/// Rounds of environment expansion before a placeholder counts as unresolvable
pub const MAX_ENV_EXPANSIONS: usize = 8;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("%%({}[^%]+)%%", ENV_PLACEHOLDER_PREFIX))
        .expect("environment placeholder pattern is valid")
});

/// Rewrites configuration values for a single region
pub struct Substitution<'a> {
    region: &'a str,
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> Substitution<'a> {
    /// Create a substitution for `region`, reading variables through `lookup`
    pub fn new(region: &'a str, lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { region, lookup }
    }

    pub fn region(&self) -> &str {
        self.region
    }

    /// Rewrite a single string
    pub fn apply_str(&self, text: &str) -> Result<String> {
        let resolved = self.resolve_env(text)?;
        Ok(resolved.replace(REGION_PLACEHOLDER, self.region))
    }

    /// Rewrite a value tree. Scalars other than strings are returned as-is.
    pub fn apply(&self, value: &Value) -> Result<Value> {
        match value {
            Value::String(text) => self.apply_str(text).map(Value::String),
            Value::Array(items) => items
                .iter()
                .map(|item| self.apply(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => self.apply_map(map).map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    /// Rewrite both keys and values of a mapping.
    ///
    /// Fails if two keys end up identical.
    pub fn apply_map(&self, map: &Map<String, Value>) -> Result<Map<String, Value>> {
        let mut rewritten = Map::new();
        for (key, value) in map {
            insert_unique(&mut rewritten, self.apply_str(key)?, self.apply(value)?)?;
        }
        Ok(rewritten)
    }

    fn resolve_env(&self, text: &str) -> Result<String> {
        let mut resolved = text.to_string();
        for _ in 0..MAX_ENV_EXPANSIONS {
            if !ENV_PLACEHOLDER.is_match(&resolved) {
                return Ok(resolved);
            }
            resolved = self.expand_env_once(&resolved)?;
        }

        match ENV_PLACEHOLDER.captures(&resolved) {
            Some(caps) => Err(ConfigError::UnresolvedEnvPlaceholder {
                name: caps[1].to_string(),
                depth: MAX_ENV_EXPANSIONS,
            }),
            None => Ok(resolved),
        }
    }

    fn expand_env_once(&self, text: &str) -> Result<String> {
        let mut resolved = String::with_capacity(text.len());
        let mut last = 0;

        for caps in ENV_PLACEHOLDER.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let name = &caps[1];
            let value = (self.lookup)(name).ok_or_else(|| ConfigError::MissingEnvVar {
                name: name.to_string(),
            })?;

            resolved.push_str(&text[last..whole.start()]);
            resolved.push_str(&value);
            last = whole.end();
        }

        resolved.push_str(&text[last..]);
        Ok(resolved)
    }
}

/// Insert into `map`, failing instead of overwriting an existing key
pub(crate) fn insert_unique(map: &mut Map<String, Value>, key: String, value: Value) -> Result<()> {
    if map.contains_key(&key) {
        return Err(ConfigError::KeyCollision { key });
    }
    map.insert(key, value);
    Ok(())
}
