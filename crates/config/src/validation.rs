//! Configuration validation

use crate::schema::{validate_against_schema, REGIONS_KEY};
use policygen_types::{ConfigBlock, ConfigError, Result};
use serde_json::Value;

/// Region every configuration must list first
pub const REQUIRED_FIRST_REGION: &str = "us-east-1";

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete account block.
    ///
    /// Runs the schema check first, then the region ordering rule, which the
    /// schema cannot express.
    pub fn validate(config: &ConfigBlock) -> Result<()> {
        validate_against_schema(config)?;
        Self::validate_region_order(config)
    }

    fn validate_region_order(config: &ConfigBlock) -> Result<()> {
        let first = config
            .get(REGIONS_KEY)
            .and_then(Value::as_array)
            .and_then(|regions| regions.first());

        match first {
            Some(Value::String(region)) if region == REQUIRED_FIRST_REGION => Ok(()),
            Some(Value::String(region)) => Err(ConfigError::RegionOrder {
                found: region.clone(),
            }),
            Some(other) => Err(ConfigError::RegionOrder {
                found: other.to_string(),
            }),
            None => Err(ConfigError::RegionOrder {
                found: "nothing".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: Value) -> ConfigBlock {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_us_east_1_first() {
        let config = block(json!({"foo": "bar", "baz": 2, "regions": ["us-east-1"]}));
        assert!(ConfigValidator::validate(&config).is_ok());

        let config = block(json!({"regions": ["us-east-1", "eu-west-1", "us-east-2"]}));
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_not_us_east_1() {
        let config = block(json!({"foo": "bar", "baz": 2, "regions": ["us-east-2"]}));
        match ConfigValidator::validate(&config) {
            Err(ConfigError::RegionOrder { found }) => assert_eq!(found, "us-east-2"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_us_east_1_later_in_list() {
        let config = block(json!({"regions": ["us-west-2", "us-east-1"]}));
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::RegionOrder { .. })
        ));
    }

    #[test]
    fn test_schema_checked_before_region_order() {
        let config = block(json!({"foo": "bar"}));
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::Schema { .. })
        ));
    }
}
