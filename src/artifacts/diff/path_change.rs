use bitflags::bitflags;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Unchanged,
}

impl ChangeKind {
    /// Classifies a path from whether it is present on each side.
    pub fn from_presence(left: bool, right: bool) -> Option<Self> {
        match (left, right) {
            (false, true) => Some(ChangeKind::Added),
            (true, false) => Some(ChangeKind::Deleted),
            (true, true) => Some(ChangeKind::Modified),
            (false, false) => None,
        }
    }

    /// The same change seen with both sides swapped.
    pub fn reversed(self) -> Self {
        match self {
            ChangeKind::Added => ChangeKind::Deleted,
            ChangeKind::Deleted => ChangeKind::Added,
            other => other,
        }
    }

    /// Added or deleted, as opposed to a content-only change.
    pub fn is_structural(&self) -> bool {
        matches!(self, ChangeKind::Added | ChangeKind::Deleted)
    }

    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            ChangeKind::Added => filter.contains(DiffFilter::ADDED),
            ChangeKind::Deleted => filter.contains(DiffFilter::DELETED),
            ChangeKind::Modified => filter.contains(DiffFilter::MODIFIED),
            ChangeKind::Unchanged => false,
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => 'M',
            ChangeKind::Unchanged => ' ',
        }
    }
}

/// One changed path reported by a subtree comparison.
///
/// `relative_path` is `/`-separated and relative to the queried subtree root;
/// the empty string is the root itself. Ordering is by path first, so in an
/// ordered [`ChangeSet`] every directory precedes its descendants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct PathChange {
    relative_path: String,
    kind: ChangeKind,
    is_directory: bool,
}

impl PathChange {
    pub fn root(kind: ChangeKind, is_directory: bool) -> Self {
        Self::new(String::new(), kind, is_directory)
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_root(&self) -> bool {
        self.relative_path.is_empty()
    }
}

pub type ChangeSet = BTreeSet<PathChange>;

/// How far below the queried location a subtree comparison descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Only the location itself.
    Empty,
    /// The location and everything below it.
    Infinity,
}

/// Strict ancestors of a relative path, nearest first, ending with the root (`""`).
pub fn relative_ancestors(path: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(
        (!path.is_empty()).then(|| parent_of(path)),
        |&current| (!current.is_empty()).then(|| parent_of(current)),
    )
}

/// Resolves a `/`-separated relative path against a local directory.
pub fn local_path(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

fn parent_of(path: &str) -> &str {
    path.rfind('/').map(|idx| &path[..idx]).unwrap_or("")
}
