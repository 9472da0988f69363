//! Sanitisation rule specifications
//!
//! A rule specification maps a column name to a transform descriptor
//! `{method, params}`. Specifications are externally authored (for example as
//! TOML configuration), read-only during processing and discarded after.
//!
//! Methods are deliberately kept as plain strings here: the rule engine owns
//! the catalog and reports an unknown method as a schema error at dispatch
//! time, rather than a deserialisation failure at load time.
//!
//! # Examples
//!
//! ```
//! use anonkit::rules::SanitisationRules;
//!
//! # fn example() -> anonkit::domain::Result<()> {
//! let rules = SanitisationRules::from_toml_str(
//!     r#"
//!     [age]
//!     method = "clip"
//!     params = { min_value = 18, max_value = 80 }
//!
//!     [city]
//!     method = "suppress"
//!     params = { threshold = 2, replacement = "Other" }
//!     "#,
//! )?;
//!
//! assert_eq!(rules.get("age").unwrap().method, "clip");
//! # Ok(())
//! # }
//! ```

use crate::domain::errors::AnonkitError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Transform descriptor for one column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Catalog method name: `clip`, `categorise`, `hash` or `suppress`
    pub method: String,
    /// Method parameters; the required keys depend on the method
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl ColumnRule {
    /// Build a rule from a method name and `(key, value)` parameter pairs.
    pub fn new(
        method: impl Into<String>,
        params: impl IntoIterator<Item = (&'static str, serde_json::Value)>,
    ) -> Self {
        Self {
            method: method.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// A required numeric parameter.
    ///
    /// # Errors
    ///
    /// [`AnonkitError::MissingParameter`] if absent,
    /// [`AnonkitError::InvalidParameter`] if present but not a number.
    pub fn require_f64(
        &self,
        parameter: &'static str,
        method: &'static str,
        column: &str,
    ) -> Result<f64> {
        let value = self
            .params
            .get(parameter)
            .ok_or_else(|| AnonkitError::MissingParameter {
                parameter,
                method,
                column: column.to_string(),
            })?;
        value
            .as_f64()
            .ok_or_else(|| AnonkitError::InvalidParameter {
                parameter,
                column: column.to_string(),
                reason: format!("expected a number, got {value}"),
            })
    }

    /// An optional string parameter.
    pub fn optional_str(&self, parameter: &'static str, column: &str) -> Result<Option<String>> {
        match self.params.get(parameter) {
            None => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(AnonkitError::InvalidParameter {
                parameter,
                column: column.to_string(),
                reason: format!("expected a string, got {other}"),
            }),
        }
    }

    /// An optional non-negative integer parameter.
    pub fn optional_usize(&self, parameter: &'static str, column: &str) -> Result<Option<usize>> {
        match self.params.get(parameter) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(|n| Some(n as usize))
                .ok_or_else(|| AnonkitError::InvalidParameter {
                    parameter,
                    column: column.to_string(),
                    reason: format!("expected a non-negative integer, got {value}"),
                }),
        }
    }
}

/// Mapping from column name to transform descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanitisationRules {
    rules: BTreeMap<String, ColumnRule>,
}

impl SanitisationRules {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a column, replacing any existing one.
    pub fn with_rule(mut self, column: impl Into<String>, rule: ColumnRule) -> Self {
        self.rules.insert(column.into(), rule);
        self
    }

    /// Look up the rule for a column.
    pub fn get(&self, column: &str) -> Option<&ColumnRule> {
        self.rules.get(column)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the specification has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse a specification from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`AnonkitError::RuleSpec`] if the TOML does not parse into the
    /// `column -> {method, params}` shape.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AnonkitError::RuleSpec(format!("Failed to parse TOML: {e}")))
    }

    /// Load a specification from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AnonkitError::RuleSpec`] if the file does not exist, cannot
    /// be read, or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AnonkitError::RuleSpec(format!(
                "Rule specification file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            AnonkitError::RuleSpec(format!(
                "Failed to read rule specification file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_toml_str() {
        let rules = SanitisationRules::from_toml_str(
            r#"
            [name]
            method = "hash"
            params = { salt = "my_secret_salt" }
            "#,
        )
        .unwrap();

        let rule = rules.get("name").unwrap();
        assert_eq!(rule.method, "hash");
        assert_eq!(
            rule.optional_str("salt", "name").unwrap().as_deref(),
            Some("my_secret_salt")
        );
    }

    #[test]
    fn test_from_toml_str_rejects_malformed_input() {
        let err = SanitisationRules::from_toml_str("age = 3").unwrap_err();
        assert!(matches!(err, AnonkitError::RuleSpec(_)));
    }

    #[test]
    fn test_require_f64_distinguishes_missing_from_invalid() {
        let rule = ColumnRule::new("clip", [("min_value", json!("low"))]);

        let missing = rule.require_f64("max_value", "clip", "age").unwrap_err();
        assert!(matches!(missing, AnonkitError::MissingParameter { .. }));

        let invalid = rule.require_f64("min_value", "clip", "age").unwrap_err();
        assert!(matches!(invalid, AnonkitError::InvalidParameter { .. }));
    }

    #[test]
    fn test_optional_usize() {
        let rule = ColumnRule::new("suppress", [("threshold", json!(2))]);
        assert_eq!(rule.optional_usize("threshold", "city").unwrap(), Some(2));
        assert_eq!(rule.optional_usize("absent", "city").unwrap(), None);
    }
}
