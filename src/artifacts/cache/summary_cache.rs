use crate::artifacts::diff::path_change::{ChangeSet, Depth, relative_ancestors};
use crate::artifacts::revision::endpoint::RemoteEndpoint;
use derive_new::new;
use std::collections::HashMap;
use tracing::trace;

/// Both sides of one comparison. Ancestor and descendant keys are derived by walking
/// the two locations in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
struct SummaryKey {
    left: RemoteEndpoint,
    right: RemoteEndpoint,
}

impl SummaryKey {
    fn join(&self, relative: &str) -> Self {
        Self::new(self.left.join(relative), self.right.join(relative))
    }

    /// Strict ancestors, nearest first, for as long as both locations have one.
    fn ancestors(&self) -> impl Iterator<Item = SummaryKey> {
        let (left, right) = (self.left.revision(), self.right.revision());

        self.left
            .location()
            .ancestors()
            .zip(self.right.location().ancestors())
            .skip(1)
            .map(move |(l, r)| Self::new(RemoteEndpoint::new(l, left), RemoteEndpoint::new(r, right)))
    }
}

/// How much of the tree below its key an entry accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    /// Only the keyed location itself.
    Path,
    /// The keyed location and every descendant.
    Subtree,
}

impl Coverage {
    fn covers(&self, depth: Depth) -> bool {
        match self {
            Coverage::Subtree => true,
            Coverage::Path => depth == Depth::Empty,
        }
    }
}

impl From<Depth> for Coverage {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Empty => Coverage::Path,
            Depth::Infinity => Coverage::Subtree,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedSummary {
    coverage: Coverage,
    changes: ChangeSet,
}

/// Hierarchical cache of subtree comparison results, owned by a single build.
///
/// A full (infinite depth) result is stored under the queried pair of endpoints, and
/// every location it reports, together with their ancestors, gets an empty entry:
/// anything below those was already enumerated by the broader query. Lookups falling
/// back to an ancestor therefore always answer with an empty set, only the exact key
/// may hold real changes.
#[derive(Debug, Default)]
pub struct SummaryCache {
    entries: HashMap<SummaryKey, CachedSummary>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means a remote query is required.
    pub fn get(
        &self,
        left: &RemoteEndpoint,
        right: &RemoteEndpoint,
        depth: Depth,
    ) -> Option<ChangeSet> {
        let key = SummaryKey::new(left.clone(), right.clone());
        if let Some(entry) = self.entries.get(&key)
            && entry.coverage.covers(depth)
        {
            trace!(%left, %right, changes = entry.changes.len(), "summary cache hit");
            return Some(entry.changes.clone());
        }

        let covering = key.ancestors().find(|ancestor| {
            self.entries
                .get(ancestor)
                .is_some_and(|entry| entry.coverage == Coverage::Subtree)
        });

        match covering {
            Some(ancestor) => {
                trace!(%left, %right, ancestor = %ancestor.left, "summary covered by an ancestor");
                Some(ChangeSet::new())
            }
            None => None,
        }
    }

    pub fn put(
        &mut self,
        left: &RemoteEndpoint,
        right: &RemoteEndpoint,
        depth: Depth,
        changes: ChangeSet,
    ) {
        let key = SummaryKey::new(left.clone(), right.clone());
        let coverage = Coverage::from(depth);

        if coverage == Coverage::Subtree {
            let covered = changes
                .iter()
                .flat_map(|change| {
                    std::iter::once(change.relative_path())
                        .chain(relative_ancestors(change.relative_path()))
                })
                .filter(|path| !path.is_empty())
                .map(|path| key.join(path))
                .collect::<Vec<_>>();

            for descendant in covered {
                self.entries.insert(
                    descendant,
                    CachedSummary {
                        coverage: Coverage::Subtree,
                        changes: ChangeSet::new(),
                    },
                );
            }
        }

        self.entries.insert(key, CachedSummary { coverage, changes });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
