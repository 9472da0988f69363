//! Sanitisation rule engine
//!
//! The engine validates a rule specification against a dataset's columns,
//! dispatches each targeted column to the matching primitive, and assembles
//! a new sanitised dataset. The input dataset is never mutated.
//!
//! # Method catalog
//!
//! | method       | parameters                            |
//! |--------------|---------------------------------------|
//! | `clip`       | `min_value`, `max_value`              |
//! | `categorise` | `bins`, `labels?`                     |
//! | `hash`       | `salt?`                               |
//! | `suppress`   | `threshold?`, `replacement?`          |
//!
//! # Examples
//!
//! ```
//! use anonkit::domain::{Dataset, Series};
//! use anonkit::rules::SanitisationRules;
//! use anonkit::sanitisation::sanitise;
//!
//! # fn example() -> anonkit::domain::Result<()> {
//! let dataset = Dataset::from_columns([
//!     Series::from_numbers("age", [25.0, 40.0, 15.0, 90.0]),
//! ])?;
//! let rules = SanitisationRules::from_toml_str(
//!     r#"
//!     [age]
//!     method = "clip"
//!     params = { min_value = 18, max_value = 80 }
//!     "#,
//! )?;
//!
//! let sanitised = sanitise(&dataset, &["age"], &rules, false)?;
//! assert_eq!(sanitised.height(), 4);
//! # Ok(())
//! # }
//! ```

use crate::domain::errors::AnonkitError;
use crate::domain::result::Result;
use crate::domain::{Dataset, Series, Value};
use crate::generalisation::categorical::{generalise_categorical, Bins};
use crate::rules::{ColumnRule, SanitisationRules};
use crate::sanitisation::primitives::{clip, hash_values, suppress};
use std::collections::HashMap;

const DEFAULT_SUPPRESS_THRESHOLD: usize = 5;

/// Sanitise a dataset by applying a rule to each targeted column.
///
/// Columns are processed in the order given in `columns_to_sanitise`; the
/// first invalid column is the one reported. Since primitives are
/// column-independent, processing order does not affect output correctness.
///
/// If `drop_incomplete` is set, rows where any targeted column is missing
/// after transformation are removed, strictly after all targeted columns
/// have been transformed.
///
/// # Errors
///
/// - [`AnonkitError::UnknownColumn`] for a target absent from the dataset
/// - [`AnonkitError::MissingRule`] for a target with no rule
/// - [`AnonkitError::UnknownMethod`] for a rule naming a method outside the
///   catalog
/// - [`AnonkitError::MissingParameter`] / [`AnonkitError::InvalidParameter`]
///   for a rule whose parameters don't satisfy the method's contract
/// - any error the dispatched transform itself reports
pub fn sanitise<S: AsRef<str>>(
    dataset: &Dataset,
    columns_to_sanitise: &[S],
    rules: &SanitisationRules,
    drop_incomplete: bool,
) -> Result<Dataset> {
    let mut transformed: HashMap<String, Series> = HashMap::new();

    for column in columns_to_sanitise {
        let column = column.as_ref();
        let series = dataset
            .column(column)
            .ok_or_else(|| AnonkitError::unknown_column(column, &dataset.column_names()))?;
        let rule = rules.get(column).ok_or_else(|| AnonkitError::MissingRule {
            column: column.to_string(),
        })?;

        let output = apply_rule(series, rule, column)?;
        tracing::debug!(column, method = rule.method.as_str(), "applied sanitisation rule");
        transformed.insert(column.to_string(), output);
    }

    // Assemble a fresh dataset: targeted columns replaced, the rest cloned.
    let mut sanitised = Dataset::new();
    for column in dataset.columns() {
        let series = transformed
            .remove(column.name())
            .unwrap_or_else(|| column.clone());
        sanitised.push_column(series)?;
    }

    if drop_incomplete {
        let keep = complete_row_mask(&sanitised, columns_to_sanitise);
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            tracing::debug!(dropped, "removed incomplete rows");
        }
        sanitised = sanitised.filter_rows(&keep);
    }

    Ok(sanitised)
}

/// Dispatch one column to the primitive its rule names.
fn apply_rule(series: &Series, rule: &ColumnRule, column: &str) -> Result<Series> {
    match rule.method.as_str() {
        "clip" => {
            let min_value = rule.require_f64("min_value", "clip", column)?;
            let max_value = rule.require_f64("max_value", "clip", column)?;
            Ok(clip(series, min_value, max_value))
        }
        "categorise" => {
            let bins_param =
                rule.params
                    .get("bins")
                    .ok_or_else(|| AnonkitError::MissingParameter {
                        parameter: "bins",
                        method: "categorise",
                        column: column.to_string(),
                    })?;
            let bins: Bins = serde_json::from_value(bins_param.clone()).map_err(|e| {
                AnonkitError::InvalidParameter {
                    parameter: "bins",
                    column: column.to_string(),
                    reason: e.to_string(),
                }
            })?;
            let labels: Option<Vec<String>> = match rule.params.get("labels") {
                None => None,
                Some(value) => Some(serde_json::from_value(value.clone()).map_err(|e| {
                    AnonkitError::InvalidParameter {
                        parameter: "labels",
                        column: column.to_string(),
                        reason: e.to_string(),
                    }
                })?),
            };
            generalise_categorical(series, &bins, labels.as_deref())
        }
        "hash" => {
            let salt = rule.optional_str("salt", column)?.unwrap_or_default();
            Ok(hash_values(series, &salt))
        }
        "suppress" => {
            let threshold = rule
                .optional_usize("threshold", column)?
                .unwrap_or(DEFAULT_SUPPRESS_THRESHOLD);
            let replacement = match rule.params.get("replacement") {
                None => Value::Missing,
                Some(value) => {
                    Value::from_param(value).ok_or_else(|| AnonkitError::InvalidParameter {
                        parameter: "replacement",
                        column: column.to_string(),
                        reason: format!("expected a scalar or null, got {value}"),
                    })?
                }
            };
            Ok(suppress(series, threshold, &replacement))
        }
        method => Err(AnonkitError::UnknownMethod {
            method: method.to_string(),
            column: column.to_string(),
        }),
    }
}

/// Rows where every targeted column is present.
fn complete_row_mask<S: AsRef<str>>(dataset: &Dataset, targets: &[S]) -> Vec<bool> {
    let mut keep = vec![true; dataset.height()];
    for target in targets {
        if let Some(column) = dataset.column(target.as_ref()) {
            for (row, value) in column.iter().enumerate() {
                if value.is_missing() {
                    keep[row] = false;
                }
            }
        }
    }
    keep
}
