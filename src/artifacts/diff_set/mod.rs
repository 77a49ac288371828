//! Diff set computation
//!
//! - `mode`: comparison strategy derived from the two endpoints
//! - `side`: one endpoint narrowed down to a single path
//! - `shadowing`: suppression of deletions implied by a deleted ancestor
//! - `reconciler`: merging of live local changes into repository results
//! - `ordering`: order of the final unit list
//! - `builder`: the orchestrating build
//! - `task`: running a build in the background

pub mod builder;
pub mod mode;
pub mod ordering;
pub mod reconciler;
pub mod shadowing;
pub mod side;
pub mod task;
