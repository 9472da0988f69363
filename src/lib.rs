// anonkit - Tabular Data Anonymisation Toolkit
// Copyright (c) 2026 Anonkit Contributors
// Licensed under the MIT License

//! # anonkit - Tabular Data Anonymisation
//!
//! anonkit anonymises tabular datasets by applying a small, declarative
//! catalog of column-level transforms that reduce re-identification risk
//! while preserving analytic utility.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Sanitising** columns with clipping, salted hashing, frequency-based
//!   suppression and categorical binning under a uniform rule contract
//! - **Generalising** coordinates to hierarchical hexagonal grid cells
//! - **Generalising** timestamps to fixed-width time-of-day slots
//!
//! Dataset loading and packaging are external collaborators: the caller
//! supplies an in-memory [`domain::Dataset`] and a rule specification, and
//! consumes a new, independent transformed dataset. Every operation is a
//! synchronous, in-memory, single-pass transform; no state persists between
//! invocations.
//!
//! anonkit does **not** guarantee any formal privacy metric (k-anonymity,
//! differential privacy); it implements mechanical transforms an operator
//! composes to approximate such guarantees.
//!
//! ## Architecture
//!
//! - [`domain`] - Core data model ([`domain::Dataset`], [`domain::Series`],
//!   [`domain::Value`]) and error types
//! - [`rules`] - Externally-authored sanitisation rule specifications
//! - [`sanitisation`] - Scalar transform primitives and the rule engine
//! - [`generalisation`] - Spatial, temporal and categorical generalisers
//!
//! ## Quick Start
//!
//! ```rust
//! use anonkit::domain::{Dataset, Series};
//! use anonkit::rules::SanitisationRules;
//! use anonkit::sanitisation::sanitise;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::from_columns([
//!         Series::from_numbers("age", [25.0, 40.0, 15.0, 90.0]),
//!         Series::from_texts("name", ["Alice", "Bob", "Charlie", "David"]),
//!     ])?;
//!
//!     let rules = SanitisationRules::from_toml_str(
//!         r#"
//!         [age]
//!         method = "clip"
//!         params = { min_value = 18, max_value = 80 }
//!
//!         [name]
//!         method = "hash"
//!         params = { salt = "my_secret_salt" }
//!         "#,
//!     )?;
//!
//!     let sanitised = sanitise(&dataset, &["age", "name"], &rules, false)?;
//!     assert_eq!(sanitised.height(), 4);
//!     Ok(())
//! }
//! ```
//!
//! ## Generalisation
//!
//! The spatial and temporal generalisers are callable independently of the
//! rule engine:
//!
//! ```rust
//! use anonkit::domain::Series;
//! use anonkit::generalisation::{
//!     format_coordinates, generalise_spatial, generalise_temporal, TimestampInput,
//! };
//!
//! # fn example() -> anonkit::domain::Result<()> {
//! let tokens = Series::from_texts("location", ["[40.7128, -74.0060]"]);
//! let (latitude, longitude) = format_coordinates(&tokens)?;
//! let cells = generalise_spatial(&latitude, &longitude, 7)?;
//! assert_eq!(cells.name(), "h3_index");
//!
//! let timestamps = Series::from_texts("ts", ["2024-01-01 10:45:00"]);
//! let slots = generalise_temporal(TimestampInput::FlatSeries(&timestamps), 30)?;
//! assert_eq!(slots.name(), "timeslot");
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod generalisation;
pub mod rules;
pub mod sanitisation;

// Re-export the most commonly used types at the crate root
pub use domain::{AnonkitError, Dataset, Result, Series, Value};
pub use rules::{ColumnRule, SanitisationRules};
