/*!
 * Required-key validation for object payloads.
 */

use serde_json::Value;

use crate::errors::ErrorDescriptor;
use crate::validation::validator::{ValidationOutcome, Validator};

/// Validator requiring an object payload carrying a fixed set of keys.
///
/// Reports one issue per missing key, in the order the keys were declared,
/// plus a single root issue when the payload is not an object at all.
#[derive(Debug, Clone, Default)]
pub struct RequiredKeysValidator {
    keys: Vec<String>,
}

impl RequiredKeysValidator {
    /// Create a validator for the given required keys
    pub fn new(keys: &[&str]) -> Self {
        RequiredKeysValidator {
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// The required keys, in declaration order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Validator for RequiredKeysValidator {
    fn validate(&self, value: &Value) -> ValidationOutcome {
        if self.keys.is_empty() {
            return Ok(value.clone());
        }

        let Some(object) = value.as_object() else {
            return Err(vec![ErrorDescriptor::root(
                "expected an object with required fields",
            )]);
        };

        let issues: Vec<ErrorDescriptor> = self
            .keys
            .iter()
            .filter(|key| !object.contains_key(*key))
            .map(|key| ErrorDescriptor::new(key.clone(), "required field is missing"))
            .collect();

        if issues.is_empty() {
            Ok(value.clone())
        } else {
            Err(issues)
        }
    }
}
