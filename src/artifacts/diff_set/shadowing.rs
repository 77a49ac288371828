use crate::artifacts::diff::path_change::{ChangeKind, PathChange, relative_ancestors};
use crate::artifacts::status::local_status::LocalStatusInfo;
use std::collections::HashSet;
use tracing::trace;

/// Suppresses deletions already implied by the deletion of an enclosing directory.
///
/// Changes must be offered in path order, so every ancestor is seen before its
/// descendants.
#[derive(Debug, Default)]
pub struct DeletionShadow {
    deleted: HashSet<String>,
    keep_locally_reverted: bool,
}

impl DeletionShadow {
    /// With `keep_locally_reverted`, a shadowed deletion is still reported when the path
    /// has an assigned revision and exists on disk, i.e. it was recreated upstream and
    /// the working copy was later updated back to a revision where it exists.
    pub fn new(keep_locally_reverted: bool) -> Self {
        Self {
            deleted: HashSet::new(),
            keep_locally_reverted,
        }
    }

    /// Whether `change` should be reported; records it when it is a deletion.
    pub fn admit(&mut self, change: &PathChange, local: Option<&LocalStatusInfo>) -> bool {
        if change.kind() != ChangeKind::Deleted {
            return true;
        }

        let shadowed_by = relative_ancestors(change.relative_path())
            .find(|ancestor| self.deleted.contains(*ancestor))
            .map(str::to_string);
        self.deleted.insert(change.relative_path().to_string());

        let Some(ancestor) = shadowed_by else {
            return true;
        };

        let locally_reverted = local.is_some_and(|info| {
            info.revision().is_some() && info.status().exists_on_disk()
        });
        if self.keep_locally_reverted && locally_reverted {
            trace!(path = change.relative_path(), %ancestor, "deletion kept, path still exists locally");
            return true;
        }

        trace!(path = change.relative_path(), %ancestor, "deletion shadowed");
        false
    }
}
