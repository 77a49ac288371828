//! Diff value types
//!
//! - `path_change`: per-path change kinds reported by subtree comparisons
//! - `diff_unit`: the self-contained units handed to a viewer, and their factory
//!
//! Content is never compared here; the units only say which paths differ and
//! where each side has to be fetched from.

pub mod diff_unit;
pub mod path_change;
