use crate::artifacts::diff::path_change::{ChangeKind, PathChange};
use crate::artifacts::revision::endpoint::RemoteEndpoint;
use crate::artifacts::status::local_status::LocalStatus;
use derive_new::new;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a viewer fetches the bytes of one side from. Never read by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentLocator {
    /// The live file in the working copy.
    Working(PathBuf),
    /// The pristine copy of a local file at the revision it was synchronized to.
    Pristine { file: PathBuf, revision: u64 },
    /// A file stored in the repository.
    Remote(RemoteEndpoint),
}

impl fmt::Display for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentLocator::Working(file) => write!(f, "{}", file.display()),
            ContentLocator::Pristine { file, revision } => {
                write!(f, "{} (pristine r{revision})", file.display())
            }
            ContentLocator::Remote(endpoint) => write!(f, "{endpoint}"),
        }
    }
}

/// Locator and label of one side, as handed to the factory.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SideContent {
    locator: Option<ContentLocator>,
    label: String,
}

impl SideContent {
    pub fn locator(&self) -> Option<&ContentLocator> {
        self.locator.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// One reported change, ready for a viewer.
///
/// Built once by [`DiffUnitFactory`] and immutable afterwards. A side without content
/// (an added path on the left, a deleted path on the right) has no locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffUnit {
    local_file: PathBuf,
    kind: ChangeKind,
    is_directory: bool,
    left: SideContent,
    right: SideContent,
    local_status: LocalStatus,
}

impl DiffUnit {
    pub fn local_file(&self) -> &Path {
        &self.local_file
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn left_locator(&self) -> Option<&ContentLocator> {
        self.left.locator()
    }

    pub fn right_locator(&self) -> Option<&ContentLocator> {
        self.right.locator()
    }

    pub fn left_label(&self) -> &str {
        self.left.label()
    }

    pub fn right_label(&self) -> &str {
        self.right.label()
    }

    pub fn local_status(&self) -> LocalStatus {
        self.local_status
    }
}

/// Assembles diff units from already resolved inputs; never talks to the repository.
pub struct DiffUnitFactory;

impl DiffUnitFactory {
    pub fn build(
        change: &PathChange,
        local_file: PathBuf,
        left: SideContent,
        right: SideContent,
        local_status: LocalStatus,
    ) -> DiffUnit {
        let left = match change.kind() {
            ChangeKind::Added => SideContent::new(None, left.label),
            _ => left,
        };
        let right = match change.kind() {
            ChangeKind::Deleted => SideContent::new(None, right.label),
            _ => right,
        };

        DiffUnit {
            local_file,
            kind: change.kind(),
            is_directory: change.is_directory(),
            left,
            right,
            local_status,
        }
    }

    /// The same unit under a different classification, with the no-content rule reapplied.
    pub fn reclassify(unit: &DiffUnit, kind: ChangeKind, local_status: LocalStatus) -> DiffUnit {
        Self::build(
            &PathChange::root(kind, unit.is_directory),
            unit.local_file.clone(),
            unit.left.clone(),
            unit.right.clone(),
            local_status,
        )
    }
}
