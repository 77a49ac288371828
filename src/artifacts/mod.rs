//! Diff set data structures and algorithms
//!
//! - `core`: Errors and cooperative cancellation
//! - `revision`: Repository locations, revisions and endpoints
//! - `status`: Local modification status of working copy paths
//! - `diff`: Per-path changes and the diff units handed to viewers
//! - `cache`: Per-build summary cache and existence resolver
//! - `diff_set`: The diff set builder and its supporting pieces

pub mod cache;
pub mod core;
pub mod diff;
pub mod diff_set;
pub mod revision;
pub mod status;
