//! Configuration schema definitions

use jsonschema::Validator;
use policygen_types::{ConfigBlock, ConfigError, Result};
use serde_json::{json, Value};
use std::sync::LazyLock;

/// Key holding the ordered list of regions policies are generated for
pub const REGIONS_KEY: &str = "regions";

/// JSON Schema every account block must satisfy.
///
/// Only the shape is checked here; the ordering rule on `regions` lives in
/// [`ConfigValidator`](crate::validation::ConfigValidator).
pub fn config_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "policygen account configuration",
        "type": "object",
        "properties": {
            "regions": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            },
            "account_name": { "type": "string" },
            "account_id": { "type": ["integer", "string"] }
        },
        "required": ["regions"]
    })
}

static VALIDATOR: LazyLock<std::result::Result<Validator, String>> =
    LazyLock::new(|| jsonschema::validator_for(&config_schema()).map_err(|e| e.to_string()));

/// Check a block against [`config_schema`], reporting every violation found
pub fn validate_against_schema(config: &ConfigBlock) -> Result<()> {
    let validator = VALIDATOR.as_ref().map_err(|e| ConfigError::Schema {
        message: format!("invalid configuration schema: {}", e),
    })?;

    let instance = Value::Object(config.clone());
    let violations: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| e.to_string())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Schema {
            message: violations.join("; "),
        })
    }
}
