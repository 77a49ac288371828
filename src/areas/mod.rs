//! Collaborators of a diff set build
//!
//! - `remote`: the remote query service (existence and subtree comparison queries)
//! - `status_cache`: the local modification status cache
//! - `working_copy`: mapping between local paths and repository locations
//! - `memory`: in-memory implementations of the remote service and the status cache
//! - `scenario`: TOML scenario files loaded into the in-memory implementations

pub mod memory;
pub mod remote;
pub mod scenario;
pub mod status_cache;
pub mod working_copy;
