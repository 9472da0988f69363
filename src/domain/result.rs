//! Result type alias for anonkit
//!
//! This module provides a convenient Result type alias that uses AnonkitError
//! as the error type.

use super::errors::AnonkitError;

/// Result type alias for anonkit operations
///
/// This is a convenience type alias that uses `AnonkitError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use anonkit::domain::result::Result;
/// use anonkit::domain::errors::AnonkitError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AnonkitError::MissingRule { column: "age".to_string() })
/// }
/// ```
pub type Result<T> = std::result::Result<T, AnonkitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AnonkitError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(AnonkitError::InvalidBinEdges);
        assert!(result.is_err());
    }
}
