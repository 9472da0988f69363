//! Tabular data model
//!
//! This module defines the in-memory representation transforms operate on:
//! a [`Value`] is one cell, a [`Series`] is a named ordered column of cells,
//! and a [`Dataset`] is an ordered collection of equal-length, uniquely-named
//! columns. Rows are positionally aligned across columns.
//!
//! Missing cells are first-class: every transform passes [`Value::Missing`]
//! through unchanged unless its documented semantics is to drop missing rows.
//!
//! # Examples
//!
//! ```
//! use anonkit::domain::{Dataset, Series, Value};
//!
//! # fn example() -> anonkit::domain::Result<()> {
//! let mut dataset = Dataset::new();
//! dataset.push_column(Series::from_numbers("age", [25.0, 40.0, 15.0, 90.0]))?;
//! dataset.push_column(Series::from_texts("city", ["NY", "NY", "LA", "Chicago"]))?;
//!
//! assert_eq!(dataset.height(), 4);
//! assert_eq!(dataset.column("age").unwrap().len(), 4);
//! # Ok(())
//! # }
//! ```

use crate::domain::errors::AnonkitError;
use crate::domain::result::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell in a column
///
/// The canonical textual form (via [`std::fmt::Display`]) is what hashing and
/// frequency counting operate on: integral numbers render without a fractional
/// part (`25`, not `25.0`), timestamps as `%Y-%m-%d %H:%M:%S`, and missing
/// cells as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric cell
    Number(f64),
    /// A parsed timestamp cell
    Timestamp(NaiveDateTime),
    /// A free-text or categorical cell
    Text(String),
    /// An absent cell
    Missing,
}

impl Value {
    /// Whether this cell is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The numeric content of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert a rule-specification parameter into a cell value.
    ///
    /// Used for the `replacement` parameter of `suppress`, which may be
    /// authored as a string, a number or null.
    pub fn from_param(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Value::Missing),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => Ok(()),
        }
    }
}

/// A named, ordered column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    values: Vec<Value>,
}

impl Series {
    /// Create a series from a name and cells.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a numeric series.
    pub fn from_numbers(name: impl Into<String>, numbers: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            numbers.into_iter().map(Value::Number).collect::<Vec<_>>(),
        )
    }

    /// Create a text series.
    pub fn from_texts<S: Into<String>>(
        name: impl Into<String>,
        texts: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            texts
                .into_iter()
                .map(|s| Value::Text(s.into()))
                .collect::<Vec<_>>(),
        )
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells, missing cells included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The cells, in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Cell at a row position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterate over cells in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// A copy of this series keeping only the rows where `keep` is true.
    ///
    /// `keep` is positionally aligned with the cells; extra mask entries are
    /// ignored, a short mask drops the tail.
    pub fn filter_rows(&self, keep: &[bool]) -> Series {
        let values = self
            .values
            .iter()
            .zip(keep.iter())
            .filter(|(_, k)| **k)
            .map(|(v, _)| v.clone())
            .collect();
        Series::new(self.name.clone(), values)
    }
}

/// An ordered collection of equal-length, uniquely-named columns
///
/// Transforms never mutate a dataset in place: the rule engine always builds
/// a fresh `Dataset`, populating columns from the source or from a transform
/// result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Series>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from columns, validating names and lengths.
    ///
    /// # Errors
    ///
    /// Returns [`AnonkitError::DuplicateColumn`] if two columns share a name,
    /// or [`AnonkitError::ColumnLengthMismatch`] if lengths disagree.
    pub fn from_columns(columns: impl IntoIterator<Item = Series>) -> Result<Self> {
        let mut dataset = Self::new();
        for column in columns {
            dataset.push_column(column)?;
        }
        Ok(dataset)
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns [`AnonkitError::DuplicateColumn`] if the name is taken, or
    /// [`AnonkitError::ColumnLengthMismatch`] if the length differs from the
    /// existing columns.
    pub fn push_column(&mut self, column: Series) -> Result<()> {
        if self.column(column.name()).is_some() {
            return Err(AnonkitError::DuplicateColumn {
                column: column.name().to_string(),
            });
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(AnonkitError::ColumnLengthMismatch {
                    column: column.name().to_string(),
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Column names, in dataset order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Series::name).collect()
    }

    /// The columns, in dataset order.
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Number of rows (0 for a dataset with no columns).
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// A copy of this dataset keeping only the rows where `keep` is true.
    pub fn filter_rows(&self, keep: &[bool]) -> Dataset {
        Dataset {
            columns: self.columns.iter().map(|c| c.filter_rows(keep)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_value_textual_form() {
        assert_eq!(Value::Number(25.0).to_string(), "25");
        assert_eq!(Value::Number(25.5).to_string(), "25.5");
        assert_eq!(Value::Text("Alice".into()).to_string(), "Alice");
        assert_eq!(Value::Missing.to_string(), "");

        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(Value::Timestamp(ts).to_string(), "2024-01-01 10:30:00");
    }

    #[test]
    fn test_value_from_param() {
        assert_eq!(
            Value::from_param(&serde_json::json!("Other")),
            Some(Value::Text("Other".into()))
        );
        assert_eq!(
            Value::from_param(&serde_json::json!(3.5)),
            Some(Value::Number(3.5))
        );
        assert_eq!(Value::from_param(&serde_json::Value::Null), Some(Value::Missing));
        assert_eq!(Value::from_param(&serde_json::json!(["no"])), None);
    }

    #[test]
    fn test_push_column_rejects_duplicates() {
        let mut dataset = Dataset::new();
        dataset
            .push_column(Series::from_numbers("age", [1.0]))
            .unwrap();
        let err = dataset
            .push_column(Series::from_numbers("age", [2.0]))
            .unwrap_err();
        assert!(matches!(err, AnonkitError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_push_column_rejects_length_mismatch() {
        let mut dataset = Dataset::new();
        dataset
            .push_column(Series::from_numbers("age", [1.0, 2.0]))
            .unwrap();
        let err = dataset
            .push_column(Series::from_numbers("income", [1.0]))
            .unwrap_err();
        assert!(matches!(err, AnonkitError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_filter_rows_keeps_alignment() {
        let dataset = Dataset::from_columns([
            Series::from_numbers("age", [25.0, 40.0, 15.0]),
            Series::from_texts("city", ["NY", "LA", "Chicago"]),
        ])
        .unwrap();

        let filtered = dataset.filter_rows(&[true, false, true]);
        assert_eq!(filtered.height(), 2);
        assert_eq!(
            filtered.column("city").unwrap().values(),
            &[Value::Text("NY".into()), Value::Text("Chicago".into())]
        );
    }
}
