use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::diff::diff_unit::{ContentLocator, SideContent};
use crate::artifacts::revision::endpoint::{RemoteEndpoint, RevisionEndpoint};
use crate::artifacts::revision::revision::{RemoteRevision, Revision};
use crate::artifacts::status::local_status::LocalStatusInfo;
use std::path::Path;

/// One endpoint narrowed down to a single path.
///
/// `remote` is what the repository is asked about on this side. For `BASE` and
/// `WORKING` that is the path's assigned revision, or nothing for a path that was
/// never committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSide {
    revision: Revision,
    remote: Option<RemoteEndpoint>,
    assigned: Option<u64>,
}

impl ResolvedSide {
    pub fn for_local(endpoint: &RevisionEndpoint, relative: &str, info: &LocalStatusInfo) -> Self {
        let revision = endpoint.revision();
        let mapped = endpoint.location().join(relative);

        let remote = match revision.to_remote() {
            Some(remote) => Some(RemoteEndpoint::new(mapped, remote)),
            None => info.revision().map(|number| {
                let location = info.url().cloned().unwrap_or(mapped);
                RemoteEndpoint::new(location, RemoteRevision::Number(number))
            }),
        };

        Self {
            revision,
            remote,
            assigned: info.revision(),
        }
    }

    pub fn for_tree(endpoint: &RevisionEndpoint, relative: &str) -> DiffSetResult<Self> {
        let remote = endpoint.revision().to_remote().ok_or_else(|| {
            DiffSetError::InvalidEndpoint(format!(
                "{endpoint} is local state and cannot be queried as a whole tree"
            ))
        })?;

        Ok(Self {
            revision: endpoint.revision(),
            remote: Some(RemoteEndpoint::new(endpoint.location().join(relative), remote)),
            assigned: None,
        })
    }

    /// The same side, moved to a path below the current one.
    pub fn descend(&self, relative: &str) -> Self {
        Self {
            revision: self.revision,
            remote: self.remote.as_ref().map(|remote| remote.join(relative)),
            assigned: self.assigned,
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn remote(&self) -> Option<&RemoteEndpoint> {
        self.remote.as_ref()
    }

    pub fn locator(&self, local_file: &Path) -> Option<ContentLocator> {
        match self.revision {
            Revision::Working => Some(ContentLocator::Working(local_file.to_path_buf())),
            Revision::Base => self.assigned.map(|revision| ContentLocator::Pristine {
                file: local_file.to_path_buf(),
                revision,
            }),
            Revision::Head | Revision::Number(_) => {
                self.remote.clone().map(ContentLocator::Remote)
            }
        }
    }

    pub fn label(&self) -> String {
        self.revision.label(self.assigned)
    }

    pub fn content(&self, local_file: &Path) -> SideContent {
        SideContent::new(self.locator(local_file), self.label())
    }
}
