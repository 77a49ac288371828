use crate::artifacts::revision::repo_url::RepoUrl;
use bitflags::bitflags;
use derive_new::new;

bitflags! {
    /// Modification classification of one local path, as reported by the status cache.
    ///
    /// Several bits may be set at once (e.g. a locally modified file that was also
    /// modified in the repository).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct LocalStatus: u32 {
        const UP_TO_DATE = 1 << 0;
        const MODIFIED_LOCALLY = 1 << 1;
        const ADDED_LOCALLY = 1 << 2;
        /// Scheduled for deletion.
        const REMOVED_LOCALLY = 1 << 3;
        /// Versioned but missing on disk.
        const DELETED_LOCALLY = 1 << 4;
        /// Not under version control yet.
        const NEW_LOCALLY = 1 << 5;
        /// Ignored or excluded from version control.
        const EXCLUDED = 1 << 6;
        const CONFLICT = 1 << 7;
        const MERGE = 1 << 8;
        const NEW_IN_REPOSITORY = 1 << 9;
        const REMOVED_IN_REPOSITORY = 1 << 10;
        const MODIFIED_IN_REPOSITORY = 1 << 11;

        const LOCAL_CHANGE = Self::MODIFIED_LOCALLY.bits()
            | Self::ADDED_LOCALLY.bits()
            | Self::REMOVED_LOCALLY.bits()
            | Self::DELETED_LOCALLY.bits()
            | Self::NEW_LOCALLY.bits()
            | Self::CONFLICT.bits()
            | Self::MERGE.bits();
    }
}

impl LocalStatus {
    /// Parses a `|`- or `,`-separated list of status names such as `modified|conflict`.
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut status = Self::empty();

        for name in s.split(['|', ',']).map(str::trim).filter(|n| !n.is_empty()) {
            status |= match name.to_ascii_lowercase().as_str() {
                "uptodate" | "up-to-date" | "normal" => Self::UP_TO_DATE,
                "modified" => Self::MODIFIED_LOCALLY,
                "added" => Self::ADDED_LOCALLY,
                "removed" => Self::REMOVED_LOCALLY,
                "deleted" | "missing" => Self::DELETED_LOCALLY,
                "new" | "unversioned" => Self::NEW_LOCALLY,
                "excluded" | "ignored" => Self::EXCLUDED,
                "conflict" => Self::CONFLICT,
                "merge" => Self::MERGE,
                "remote-new" => Self::NEW_IN_REPOSITORY,
                "remote-removed" => Self::REMOVED_IN_REPOSITORY,
                "remote-modified" => Self::MODIFIED_IN_REPOSITORY,
                _ => return None,
            };
        }

        Some(status)
    }

    /// Severity rank used to order diff units: lower sorts first.
    pub fn comparable(&self) -> u8 {
        if self.contains(Self::CONFLICT) {
            0
        } else if self.contains(Self::MERGE) {
            1
        } else if self.contains(Self::DELETED_LOCALLY) {
            10
        } else if self.contains(Self::REMOVED_LOCALLY) {
            11
        } else if self.contains(Self::NEW_LOCALLY) {
            12
        } else if self.contains(Self::ADDED_LOCALLY) {
            13
        } else if self.contains(Self::MODIFIED_LOCALLY) {
            14
        } else if self.contains(Self::REMOVED_IN_REPOSITORY) {
            30
        } else if self.contains(Self::NEW_IN_REPOSITORY) {
            31
        } else if self.contains(Self::MODIFIED_IN_REPOSITORY) {
            32
        } else if self.contains(Self::UP_TO_DATE) {
            50
        } else {
            100
        }
    }

    pub fn is_local_change(&self) -> bool {
        self.intersects(Self::LOCAL_CHANGE)
    }

    pub fn is_excluded(&self) -> bool {
        self.contains(Self::EXCLUDED)
    }

    /// Added or unversioned, i.e. not committed yet.
    pub fn is_uncommitted_addition(&self) -> bool {
        self.intersects(Self::ADDED_LOCALLY | Self::NEW_LOCALLY)
    }

    pub fn is_local_removal(&self) -> bool {
        self.intersects(Self::REMOVED_LOCALLY | Self::DELETED_LOCALLY)
    }

    /// Whether the path is present in the live working copy.
    pub fn exists_on_disk(&self) -> bool {
        !self.intersects(Self::REMOVED_LOCALLY | Self::DELETED_LOCALLY | Self::NEW_IN_REPOSITORY)
    }
}

/// What the local status cache knows about one path.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LocalStatusInfo {
    pub(crate) status: LocalStatus,
    pub(crate) is_directory: bool,
    /// Added with history (copied or moved) and not committed yet.
    pub(crate) copied: bool,
    /// Revision the path was last synchronized to; `None` for uncommitted additions.
    pub(crate) revision: Option<u64>,
    /// Repository location the path tracks, when it differs from the mapped default.
    pub(crate) url: Option<RepoUrl>,
}

impl LocalStatusInfo {
    pub fn versioned(status: LocalStatus, revision: u64) -> Self {
        Self::new(status, false, false, Some(revision), None)
    }

    pub fn unversioned(status: LocalStatus) -> Self {
        Self::new(status, false, false, None, None)
    }

    pub fn directory(mut self) -> Self {
        self.is_directory = true;
        self
    }

    pub fn copied(mut self) -> Self {
        self.copied = true;
        self
    }

    pub fn with_url(mut self, url: RepoUrl) -> Self {
        self.url = Some(url);
        self
    }

    pub fn status(&self) -> LocalStatus {
        self.status
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn url(&self) -> Option<&RepoUrl> {
        self.url.as_ref()
    }

    /// Freshly added (plain or with history) and not committed yet.
    pub fn is_added_uncommitted(&self) -> bool {
        self.status.is_uncommitted_addition() || self.copied
    }
}
