//! Command implementations
//!
//! - `diff`: runs one diff set build over a scenario and prints the resulting units

pub mod diff;
