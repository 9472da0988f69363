//! Generalisation transforms
//!
//! Generalisation maps a precise attribute to a coarser, shared category:
//!
//! - **Spatial**: free-text coordinate parsing and mapping to a hierarchical
//!   hexagonal grid cell ([`format_coordinates`], [`generalise_spatial`])
//! - **Temporal**: timestamp normalisation and bucketing into fixed-width
//!   time-of-day slots ([`format_timestamp`], [`generalise_temporal`])
//! - **Categorical**: numeric-range binning ([`generalise_categorical`]),
//!   shared with the sanitisation rule engine's `categorise` method
//!
//! The spatial and temporal generalisers are invoked independently of the
//! rule engine but share its validation philosophy and data-shape contracts.

pub mod categorical;
pub mod spatial;
pub mod temporal;

// Re-export commonly used items
pub use categorical::{generalise_categorical, Bins};
pub use spatial::{format_coordinates, generalise_spatial};
pub use temporal::{format_timestamp, generalise_temporal, TimestampInput, ALLOWED_RESOLUTIONS};
