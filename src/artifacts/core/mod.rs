//! Core utilities and shared types
//!
//! - `cancellation`: the cooperative cancellation token polled by long-running builds
//! - `error`: the error type every build reports its failures with

pub mod cancellation;
pub mod error;
