use crate::artifacts::diff::path_change::{Depth, PathChange};
use crate::artifacts::revision::endpoint::RemoteEndpoint;
use crate::artifacts::revision::repo_url::RepoUrl;
use crate::artifacts::revision::revision::RemoteRevision;
use derive_new::new;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The location does not exist in the given revision.
    #[error("{location} does not exist in revision {revision}")]
    NotFound {
        location: RepoUrl,
        revision: RemoteRevision,
    },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server failure: {0}")]
    Server(String),
}

/// Answer of a successful existence query.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RemoteInfo {
    is_directory: bool,
    last_changed: u64,
}

impl RemoteInfo {
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn last_changed(&self) -> u64 {
        self.last_changed
    }
}

/// The version-control queries a diff set build relies on.
///
/// Every call may be expensive; implementations own any retry policy.
pub trait RemoteRepository: Send + Sync {
    /// Fails with [`RemoteError::NotFound`] when the location does not exist in the revision.
    fn info(&self, endpoint: &RemoteEndpoint) -> Result<RemoteInfo, RemoteError>;

    /// Every path below `left` (or `right`) that differs between the two endpoints.
    ///
    /// Paths in the result are relative to the queried location and are not reported
    /// when unchanged.
    fn diff_summarize(
        &self,
        left: &RemoteEndpoint,
        right: &RemoteEndpoint,
        depth: Depth,
        include_dirs: bool,
    ) -> Result<Vec<PathChange>, RemoteError>;
}
