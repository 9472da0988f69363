//! Domain error types
//!
//! This module defines the error hierarchy for anonkit. All errors are
//! domain-specific and don't expose third-party types. Every variant names
//! the offending column, token or value so a caller can locate and fix the
//! input without re-running with extra diagnostics.

use thiserror::Error;

/// Main anonkit error type
///
/// This is the primary error type used throughout the crate. Variants fall
/// into four groups: schema errors (unknown column, unknown method, missing
/// rule or parameter), domain/range errors (resolution, coordinate bounds,
/// bin definitions), parse errors (coordinate tokens, strict timestamp
/// coercion) and rule-specification loading errors.
#[derive(Debug, Error)]
pub enum AnonkitError {
    /// Targeted column does not exist in the dataset
    #[error("Column '{column}' not found in dataset. Available columns are: [{available}]")]
    UnknownColumn { column: String, available: String },

    /// No rule was supplied for a targeted column
    #[error("No sanitisation rule specified for column '{column}'")]
    MissingRule { column: String },

    /// Rule names a method outside the catalog
    #[error("Unknown sanitisation method '{method}' for column '{column}'")]
    UnknownMethod { method: String, column: String },

    /// Rule omits a parameter the method requires
    #[error("Missing required parameter '{parameter}' for method '{method}' on column '{column}'")]
    MissingParameter {
        parameter: &'static str,
        method: &'static str,
        column: String,
    },

    /// Rule supplies a parameter of the wrong shape
    #[error("Invalid value for parameter '{parameter}' on column '{column}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        column: String,
        reason: String,
    },

    /// Two columns in one dataset share a name
    #[error("Duplicate column name '{column}' in dataset")]
    DuplicateColumn { column: String },

    /// Column length disagrees with the rest of the dataset
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// H3 resolution outside `[0, 15]`
    #[error("H3 spatial resolution must be between 0 and 15, got {0}")]
    ResolutionOutOfRange(u8),

    /// Latitude outside `[-90, 90]` or non-finite
    #[error("Latitude values must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]` or non-finite
    #[error("Longitude values must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),

    /// Coordinate token is not `"[lat, lon]"`
    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    /// Strict timestamp coercion failed
    #[error("Failed to convert '{0}' to a timestamp")]
    TimestampParse(String),

    /// Bin count must be a positive integer
    #[error("Number of bins must be a positive integer, got {0}")]
    InvalidBinCount(usize),

    /// Explicit bin edges must be at least two ascending values
    #[error("Bin edges must be an ascending sequence of at least two values")]
    InvalidBinEdges,

    /// Label list length does not match the bin count
    #[error("Expected {bins} labels to match the number of bins, got {labels}")]
    LabelCountMismatch { bins: usize, labels: usize },

    /// Count-based binning over a column with no observed values
    #[error("Cannot infer a binning range for column '{column}': no observed values")]
    EmptyColumn { column: String },

    /// Rule specification could not be loaded or parsed
    #[error("Rule specification error: {0}")]
    RuleSpec(String),
}

impl AnonkitError {
    /// Build an [`AnonkitError::UnknownColumn`] listing the columns that do exist.
    pub fn unknown_column(column: &str, available: &[&str]) -> Self {
        Self::UnknownColumn {
            column: column.to_string(),
            available: available.join(", "),
        }
    }
}
