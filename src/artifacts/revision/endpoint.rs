use crate::artifacts::revision::repo_url::RepoUrl;
use crate::artifacts::revision::revision::{RemoteRevision, Revision};
use derive_new::new;
use std::fmt;

/// One side of a comparison: a tree location at a revision.
///
/// Two endpoints are the same side when both location and revision are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct RevisionEndpoint {
    location: RepoUrl,
    revision: Revision,
}

impl RevisionEndpoint {
    pub fn location(&self) -> &RepoUrl {
        &self.location
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn is_same_side(&self, other: &RevisionEndpoint) -> bool {
        self == other
    }
}

impl fmt::Display for RevisionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.location, self.revision)
    }
}

/// An endpoint resolved far enough that the remote repository can answer for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct RemoteEndpoint {
    location: RepoUrl,
    revision: RemoteRevision,
}

impl RemoteEndpoint {
    pub fn location(&self) -> &RepoUrl {
        &self.location
    }

    pub fn revision(&self) -> RemoteRevision {
        self.revision
    }

    pub fn join(&self, relative: &str) -> Self {
        Self {
            location: self.location.join(relative),
            revision: self.revision,
        }
    }
}

impl fmt::Display for RemoteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.location, self.revision)
    }
}
