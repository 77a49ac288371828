use crate::areas::remote::RemoteError;
use thiserror::Error;

/// Failure of a whole diff set build.
///
/// Cancellation is not represented here, a canceled build completes with
/// [`DiffSetOutcome::Canceled`](crate::artifacts::diff_set::builder::DiffSetOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffSetError {
    /// A remote query failed for a reason other than a missing path.
    #[error("remote query failed: {0}")]
    Remote(#[from] RemoteError),
    /// The collaborators reported data that breaks a structural invariant.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
    /// An endpoint, revision or location could not be used for the comparison.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

pub type DiffSetResult<T> = Result<T, DiffSetError>;
