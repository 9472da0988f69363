//! Domain models and types for anonkit.
//!
//! This module contains the core data model and error types shared by every
//! transform.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Tabular model** ([`Value`], [`Series`], [`Dataset`])
//! - **Error types** ([`AnonkitError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AnonkitError>`]:
//!
//! ```rust
//! use anonkit::domain::{AnonkitError, Result};
//!
//! fn example() -> Result<()> {
//!     let _rules = anonkit::rules::SanitisationRules::from_toml_str("")?;
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use dataset::{Dataset, Series, Value};
pub use errors::AnonkitError;
pub use result::Result;
