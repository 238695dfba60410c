//! JSON-Schema validation of raw roster data

use std::path::Path;

use itertools::Itertools;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Schema for a roster: a list of employees, each with an id, a name
/// (`first_name` or `name`), a non-negative salary and an optional manager id.
pub fn roster_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Employees",
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "first_name": { "type": "string" },
                "name": { "type": "string" },
                "salary": { "type": "integer", "minimum": 0 },
                "manager": { "type": ["integer", "null"] }
            },
            "required": ["id", "salary"],
            "oneOf": [
                { "required": ["first_name"] },
                { "required": ["name"] }
            ]
        }
    })
}

/// Compiled schema that raw roster data is checked against.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Validator for the built-in roster schema.
    pub fn default_schema() -> Self {
        let validator =
            jsonschema::validator_for(&roster_schema()).expect("built-in roster schema compiles");
        Self { validator }
    }

    /// Compile a schema given as a JSON value.
    pub fn from_value(schema: &Value) -> ApplicationResult<Self> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| ApplicationError::Config {
                message: format!("invalid schema: {}", e),
            })?;
        Ok(Self { validator })
    }

    /// Load and compile a schema file (YAML or JSON).
    #[instrument(level = "debug", skip(fs))]
    pub fn from_file(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<Self> {
        let content = fs
            .read_to_string(path)
            .with_path_context("read schema", path)?;
        let schema: Value =
            serde_yaml::from_str(&content).map_err(|e| ApplicationError::Config {
                message: format!("parse schema {}: {}", path.display(), e),
            })?;
        debug!("from_file: loaded schema {}", path.display());
        Self::from_value(&schema)
    }

    /// Check `instance`, collecting every violation into one error.
    pub fn validate(&self, instance: &Value) -> ApplicationResult<()> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|e| {
                let location = e.instance_path.to_string();
                let location = if location.is_empty() { "/".to_string() } else { location };
                format!("{}: {}", location, e)
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::Schema {
                message: violations.iter().join("\n"),
            })
        }
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::default_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_original_roster_shape_when_validating_then_passes() {
        let data = json!([
            { "id": 1, "first_name": "jacob", "salary": 130000, "manager": null },
            { "id": 2, "first_name": "brian", "salary": 90000, "manager": 1 }
        ]);

        assert!(SchemaValidator::default_schema().validate(&data).is_ok());
    }

    #[test]
    fn given_empty_roster_when_validating_then_passes() {
        assert!(SchemaValidator::default_schema().is_valid(&json!([])));
    }

    #[rstest]
    #[case::missing_id(json!([{ "first_name": "a", "salary": 1 }]))]
    #[case::missing_name(json!([{ "id": 1, "salary": 1 }]))]
    #[case::both_names(json!([{ "id": 1, "name": "a", "first_name": "a", "salary": 1 }]))]
    #[case::string_salary(json!([{ "id": 1, "name": "a", "salary": "lots" }]))]
    #[case::negative_salary(json!([{ "id": 1, "name": "a", "salary": -5 }]))]
    #[case::string_manager(json!([{ "id": 1, "name": "a", "salary": 1, "manager": "boss" }]))]
    #[case::not_a_list(json!({ "id": 1, "name": "a", "salary": 1 }))]
    fn given_malformed_roster_when_validating_then_schema_error(#[case] data: Value) {
        let result = SchemaValidator::default_schema().validate(&data);

        assert!(matches!(result, Err(ApplicationError::Schema { .. })));
    }

    #[test]
    fn given_violation_when_validating_then_message_names_location() {
        let data = json!([{ "id": 1, "name": "a", "salary": 1 }, { "id": "x", "name": "b", "salary": 1 }]);

        let Err(ApplicationError::Schema { message }) =
            SchemaValidator::default_schema().validate(&data)
        else {
            panic!("expected schema error");
        };
        assert!(message.contains("/1/id"), "{}", message);
    }

    #[test]
    fn given_invalid_schema_when_compiling_then_config_error() {
        let result = SchemaValidator::from_value(&json!({ "type": 12 }));

        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }
}
