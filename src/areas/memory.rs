//! In-memory collaborators
//!
//! A revisioned snapshot store standing in for the remote repository, and a map-backed
//! local status cache. Both back the scenario files run by the command line and the
//! test suites; the repository counts every query it answers.

use crate::areas::remote::{RemoteError, RemoteInfo, RemoteRepository};
use crate::areas::status_cache::LocalStatusCache;
use crate::artifacts::diff::path_change::{ChangeKind, Depth, PathChange, relative_ancestors};
use crate::artifacts::revision::endpoint::RemoteEndpoint;
use crate::artifacts::revision::repo_url::RepoUrl;
use crate::artifacts::revision::revision::RemoteRevision;
use crate::artifacts::status::local_status::LocalStatusInfo;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNode {
    File(String),
    Directory,
}

impl MemoryNode {
    pub fn is_directory(&self) -> bool {
        matches!(self, MemoryNode::Directory)
    }
}

/// Paths relative to the repository root, mapped to their node.
pub type Snapshot = BTreeMap<String, MemoryNode>;

static REPOSITORY_ROOT: MemoryNode = MemoryNode::Directory;

#[derive(Debug)]
pub struct MemoryRepository {
    root: RepoUrl,
    /// `revisions[n]` is the tree of revision `n`; revision 0 is empty.
    revisions: Vec<Snapshot>,
    failure: Option<RemoteError>,
    info_calls: AtomicUsize,
    summarize_calls: AtomicUsize,
}

impl MemoryRepository {
    pub fn new(root: RepoUrl) -> Self {
        Self {
            root,
            revisions: vec![Snapshot::new()],
            failure: None,
            info_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> &RepoUrl {
        &self.root
    }

    /// Records a revision holding exactly `files` and returns its number.
    pub fn commit<I, P, C>(&mut self, files: I) -> u64
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let snapshot = files
            .into_iter()
            .map(|(path, content)| (path.into(), MemoryNode::File(content.into())))
            .collect::<Snapshot>();

        self.commit_snapshot(snapshot)
    }

    /// Records a revision from a snapshot, adding every implied parent directory.
    pub fn commit_snapshot(&mut self, snapshot: Snapshot) -> u64 {
        let mut tree = Snapshot::new();

        for (path, node) in snapshot {
            let path = path.trim_matches('/').to_string();
            for ancestor in relative_ancestors(&path).filter(|a| !a.is_empty()) {
                tree.insert(ancestor.to_string(), MemoryNode::Directory);
            }
            tree.insert(path, node);
        }

        self.revisions.push(tree);
        self.head()
    }

    pub fn head(&self) -> u64 {
        (self.revisions.len() - 1) as u64
    }

    /// Every query fails with `failure` from now on.
    pub fn with_failure(mut self, failure: RemoteError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::SeqCst)
    }

    pub fn remote_calls(&self) -> usize {
        self.info_calls() + self.summarize_calls()
    }

    fn check_failure(&self) -> Result<(), RemoteError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    fn snapshot(&self, revision: RemoteRevision) -> Result<(u64, &Snapshot), RemoteError> {
        let number = revision.number().unwrap_or_else(|| self.head());

        usize::try_from(number)
            .ok()
            .and_then(|idx| self.revisions.get(idx))
            .map(|snapshot| (number, snapshot))
            .ok_or_else(|| RemoteError::Server(format!("no such revision: {number}")))
    }

    fn relative(&self, location: &RepoUrl) -> Result<String, RemoteError> {
        location.relative_to(&self.root).ok_or_else(|| {
            RemoteError::Server(format!("{location} is not inside repository {}", self.root))
        })
    }

    fn node<'s>(snapshot: &'s Snapshot, relative: &str) -> Option<&'s MemoryNode> {
        if relative.is_empty() {
            return Some(&REPOSITORY_ROOT);
        }

        snapshot.get(relative)
    }

    /// Nodes at and below `relative`, keyed by their path relative to it.
    fn subtree<'s>(
        snapshot: &'s Snapshot,
        relative: &str,
        depth: Depth,
    ) -> Option<BTreeMap<String, &'s MemoryNode>> {
        let root = Self::node(snapshot, relative)?;
        let mut nodes = BTreeMap::from([(String::new(), root)]);

        if depth == Depth::Infinity && root.is_directory() {
            let prefix = if relative.is_empty() {
                String::new()
            } else {
                format!("{relative}/")
            };
            nodes.extend(snapshot.iter().filter_map(|(path, node)| {
                path.strip_prefix(prefix.as_str())
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), node))
            }));
        }

        Some(nodes)
    }

    fn not_found(endpoint: &RemoteEndpoint) -> RemoteError {
        RemoteError::NotFound {
            location: endpoint.location().clone(),
            revision: endpoint.revision(),
        }
    }
}

impl RemoteRepository for MemoryRepository {
    fn info(&self, endpoint: &RemoteEndpoint) -> Result<RemoteInfo, RemoteError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        trace!(%endpoint, "memory repository info");
        self.check_failure()?;

        let relative = self.relative(endpoint.location())?;
        let (number, snapshot) = self.snapshot(endpoint.revision())?;
        let node = Self::node(snapshot, &relative).ok_or_else(|| Self::not_found(endpoint))?;

        let last_changed = (1..=number)
            .rev()
            .find(|&n| {
                let current = self.revisions.get(n as usize).and_then(|s| s.get(&relative));
                let previous = self.revisions.get(n as usize - 1).and_then(|s| s.get(&relative));
                current != previous
            })
            .unwrap_or(0);

        Ok(RemoteInfo::new(node.is_directory(), last_changed))
    }

    fn diff_summarize(
        &self,
        left: &RemoteEndpoint,
        right: &RemoteEndpoint,
        depth: Depth,
        include_dirs: bool,
    ) -> Result<Vec<PathChange>, RemoteError> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        trace!(%left, %right, ?depth, "memory repository diff summarize");
        self.check_failure()?;

        let (_, left_snapshot) = self.snapshot(left.revision())?;
        let (_, right_snapshot) = self.snapshot(right.revision())?;
        let left_nodes = Self::subtree(left_snapshot, &self.relative(left.location())?, depth)
            .ok_or_else(|| Self::not_found(left))?;
        let right_nodes = Self::subtree(right_snapshot, &self.relative(right.location())?, depth)
            .ok_or_else(|| Self::not_found(right))?;

        let paths = left_nodes
            .keys()
            .chain(right_nodes.keys())
            .collect::<BTreeSet<_>>();

        let changes = paths
            .into_iter()
            .filter_map(|path| {
                let change = match (left_nodes.get(path), right_nodes.get(path)) {
                    (Some(old), Some(new)) if old == new => return None,
                    (Some(_), Some(new)) => (ChangeKind::Modified, new.is_directory()),
                    (Some(old), None) => (ChangeKind::Deleted, old.is_directory()),
                    (None, Some(new)) => (ChangeKind::Added, new.is_directory()),
                    (None, None) => return None,
                };
                Some(PathChange::new(path.clone(), change.0, change.1))
            })
            .filter(|change| include_dirs || !change.is_directory())
            .collect();

        Ok(changes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStatusCache {
    statuses: BTreeMap<PathBuf, LocalStatusInfo>,
}

impl MemoryStatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<PathBuf>, info: LocalStatusInfo) {
        self.statuses.insert(file.into(), info);
    }

    pub fn with(mut self, file: impl Into<PathBuf>, info: LocalStatusInfo) -> Self {
        self.insert(file, info);
        self
    }
}

impl LocalStatusCache for MemoryStatusCache {
    fn status_of(&self, file: &Path) -> Option<LocalStatusInfo> {
        self.statuses.get(file).cloned()
    }

    fn list_files(&self, root: &Path) -> Vec<PathBuf> {
        self.statuses
            .keys()
            .filter(|path| path.starts_with(root))
            .cloned()
            .collect()
    }
}
