//! Local modification status
//!
//! This module models what the local status cache reports about each path of the
//! working copy: its modification classification, whether it is a directory, whether
//! it was copied, and the revision it was last synchronized to.

pub mod local_status;
