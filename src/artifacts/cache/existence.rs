use crate::areas::remote::{RemoteError, RemoteInfo, RemoteRepository};
use crate::artifacts::core::error::DiffSetResult;
use crate::artifacts::revision::endpoint::RemoteEndpoint;
use crate::artifacts::revision::repo_url::RepoUrl;
use crate::artifacts::revision::revision::RemoteRevision;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Locations confirmed absent from the repository at a revision.
///
/// Absence is inherited: once a location is recorded missing, every location below it
/// is missing at that revision as well.
#[derive(Debug, Default)]
pub struct MissingAncestorSet {
    missing: HashSet<(RepoUrl, RemoteRevision)>,
}

impl MissingAncestorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, location: RepoUrl, revision: RemoteRevision) {
        self.missing.insert((location, revision));
    }

    /// The recorded location covering `location` at `revision`, if any.
    pub fn covering(&self, location: &RepoUrl, revision: RemoteRevision) -> Option<RepoUrl> {
        location
            .ancestors()
            .find(|ancestor| self.missing.contains(&(ancestor.clone(), revision)))
    }

    pub fn len(&self) -> usize {
        self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Answers "does this location exist at this revision" with as few remote calls as possible.
pub struct ExistenceResolver<'r> {
    remote: &'r dyn RemoteRepository,
    missing: MissingAncestorSet,
}

impl<'r> ExistenceResolver<'r> {
    pub fn new(remote: &'r dyn RemoteRepository) -> Self {
        Self {
            remote,
            missing: MissingAncestorSet::new(),
        }
    }

    /// `Ok(None)` when the endpoint does not exist; any failure other than
    /// [`RemoteError::NotFound`] is returned as is.
    pub fn resolve(&mut self, endpoint: &RemoteEndpoint) -> DiffSetResult<Option<RemoteInfo>> {
        if let Some(ancestor) = self.missing.covering(endpoint.location(), endpoint.revision()) {
            trace!(%endpoint, %ancestor, "known missing");
            return Ok(None);
        }

        debug!(%endpoint, "remote info");
        match self.remote.info(endpoint) {
            Ok(info) => {
                trace!(%endpoint, last_changed = info.last_changed(), "exists");
                Ok(Some(info))
            }
            Err(RemoteError::NotFound { .. }) => {
                debug!(%endpoint, "does not exist, recording as missing");
                self.missing
                    .record(endpoint.location().clone(), endpoint.revision());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&mut self, endpoint: &RemoteEndpoint) -> DiffSetResult<bool> {
        Ok(self.resolve(endpoint)?.is_some())
    }

    pub fn missing(&self) -> &MissingAncestorSet {
        &self.missing
    }
}
