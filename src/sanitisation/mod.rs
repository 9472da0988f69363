//! Column-local sanitisation transforms
//!
//! This module provides the scalar transform primitives (clip, hash,
//! suppress) and the rule engine that dispatches them:
//!
//! - **Primitives**: pure column-in/column-out functions with no cross-column
//!   dependency ([`clip`], [`hash_values`], [`suppress`])
//! - **Engine**: validates a rule specification and applies one rule per
//!   targeted column ([`sanitise`])
//!
//! Binning (`categorise`) lives in [`crate::generalisation::categorical`]
//! and is dispatched from here as well.

pub mod engine;
pub mod primitives;

// Re-export commonly used items
pub use engine::sanitise;
pub use primitives::{clip, hash_values, suppress};
