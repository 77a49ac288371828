use crate::artifacts::status::local_status::LocalStatusInfo;
use std::path::{Path, PathBuf};

/// Read access to the cached local modification status of the working copy.
pub trait LocalStatusCache: Send + Sync {
    /// `None` when the path is unknown to the cache.
    fn status_of(&self, file: &Path) -> Option<LocalStatusInfo>;

    /// Every known path at or below `root`, in path order.
    fn list_files(&self, root: &Path) -> Vec<PathBuf>;
}
