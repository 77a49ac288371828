use crate::areas::status_cache::LocalStatusCache;
use crate::areas::working_copy::WorkingCopy;
use crate::artifacts::diff::diff_unit::{ContentLocator, DiffUnit, DiffUnitFactory, SideContent};
use crate::artifacts::diff::path_change::{ChangeKind, PathChange};
use crate::artifacts::diff_set::side::ResolvedSide;
use crate::artifacts::revision::endpoint::RevisionEndpoint;
use crate::artifacts::revision::revision::Revision;
use crate::artifacts::status::local_status::LocalStatusInfo;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Pending local-only diff units keyed by local file.
#[derive(Debug, Clone, Default)]
pub struct WorkingCopyOverrides {
    units: BTreeMap<PathBuf, DiffUnit>,
}

impl WorkingCopyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// One unit per locally changed file under `roots`, oriented by which endpoint is
    /// the live working copy. Empty when neither is.
    pub fn collect(
        status_cache: &dyn LocalStatusCache,
        working_copy: &WorkingCopy,
        roots: &[PathBuf],
        left: &RevisionEndpoint,
        right: &RevisionEndpoint,
    ) -> Self {
        let working_on_left = match (left.revision().is_working(), right.revision().is_working()) {
            (true, false) => true,
            (false, true) => false,
            _ => return Self::new(),
        };

        let mut overrides = Self::new();
        for file in roots.iter().flat_map(|root| status_cache.list_files(root)) {
            if overrides.contains(&file) {
                continue;
            }
            let Some(info) = status_cache.status_of(&file) else {
                continue;
            };
            if info.is_directory() || info.status().is_excluded() {
                continue;
            }
            if !info.status().is_local_change() && !info.is_copied() {
                continue;
            }
            let Ok(relative) = working_copy.relative_path(&file) else {
                debug!(file = %file.display(), "local change outside of the working copy ignored");
                continue;
            };

            let unit = Self::local_unit(&file, &relative, &info, left, right, working_on_left);
            trace!(file = %file.display(), kind = ?unit.kind(), "local override");
            overrides.insert(unit);
        }

        overrides
    }

    fn local_unit(
        file: &Path,
        relative: &str,
        info: &LocalStatusInfo,
        left: &RevisionEndpoint,
        right: &RevisionEndpoint,
        working_on_left: bool,
    ) -> DiffUnit {
        let kind = if info.is_added_uncommitted() {
            ChangeKind::Added
        } else if info.status().is_local_removal() {
            ChangeKind::Deleted
        } else {
            ChangeKind::Modified
        };
        let kind = if working_on_left { kind.reversed() } else { kind };

        // Only used verbatim when the repository reports no change, so the pristine
        // copy stands in for whatever revision the other side names.
        let side = |endpoint: &RevisionEndpoint| {
            let resolved = ResolvedSide::for_local(endpoint, relative, info);
            let locator = match endpoint.revision() {
                Revision::Working => resolved.locator(file),
                _ => info.revision().map(|revision| ContentLocator::Pristine {
                    file: file.to_path_buf(),
                    revision,
                }),
            };
            SideContent::new(locator, resolved.label())
        };

        DiffUnitFactory::build(
            &PathChange::root(kind, false),
            file.to_path_buf(),
            side(left),
            side(right),
            info.status(),
        )
    }

    pub fn insert(&mut self, unit: DiffUnit) {
        self.units.insert(unit.local_file().to_path_buf(), unit);
    }

    pub fn get(&self, file: &Path) -> Option<&DiffUnit> {
        self.units.get(file)
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.units.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<DiffUnit> for WorkingCopyOverrides {
    fn from_iter<T: IntoIterator<Item = DiffUnit>>(iter: T) -> Self {
        let mut overrides = Self::new();
        iter.into_iter().for_each(|unit| overrides.insert(unit));
        overrides
    }
}

/// Merges live local state into the units produced from repository queries.
#[derive(Debug, Clone, Copy)]
pub struct WorkingCopyReconciler {
    working_on_left: bool,
}

impl WorkingCopyReconciler {
    /// `None` unless exactly one endpoint is the live working copy.
    pub fn for_endpoints(left: &RevisionEndpoint, right: &RevisionEndpoint) -> Option<Self> {
        match (left.revision().is_working(), right.revision().is_working()) {
            (true, false) => Some(Self {
                working_on_left: true,
            }),
            (false, true) => Some(Self {
                working_on_left: false,
            }),
            _ => None,
        }
    }

    /// First resolves every remote unit against its override, then appends the
    /// overrides no remote unit claimed, in path order.
    ///
    /// `absent` lists local paths already compared and found on neither side; their
    /// overrides count as claimed, since there is no content to show for either side.
    pub fn reconcile(
        &self,
        remote_units: Vec<DiffUnit>,
        overrides: &WorkingCopyOverrides,
        absent: &BTreeSet<PathBuf>,
    ) -> Vec<DiffUnit> {
        let (claimed, mut units) = remote_units.into_iter().fold(
            (absent.clone(), Vec::new()),
            |(mut claimed, mut units), unit| {
                match overrides.get(unit.local_file()) {
                    Some(local) => {
                        claimed.insert(unit.local_file().to_path_buf());
                        units.push(Self::merge(unit, local));
                    }
                    None if self.keeps(&unit) => units.push(unit),
                    None => {}
                }
                (claimed, units)
            },
        );

        let leftovers = overrides
            .units
            .iter()
            .filter(|(file, _)| !claimed.contains(*file))
            .map(|(_, unit)| unit.clone())
            .collect::<Vec<_>>();
        debug!(
            claimed = claimed.len(),
            leftovers = leftovers.len(),
            "reconciled local overrides"
        );
        units.extend(leftovers);

        units
    }

    fn merge(remote: DiffUnit, local: &DiffUnit) -> DiffUnit {
        if local.kind().is_structural() {
            trace!(file = %remote.local_file().display(), kind = ?local.kind(), "local classification wins");
            return DiffUnitFactory::reclassify(&remote, local.kind(), local.local_status());
        }
        if remote.kind() == ChangeKind::Unchanged {
            return local.clone();
        }

        DiffUnitFactory::reclassify(&remote, remote.kind(), local.local_status())
    }

    /// Units from the per-path comparison already take WORKING presence from disk; this
    /// catches units handed in whose working side was classified some other way.
    fn keeps(&self, unit: &DiffUnit) -> bool {
        let working_side_absent = match unit.kind() {
            ChangeKind::Unchanged => return false,
            ChangeKind::Added => self.working_on_left,
            ChangeKind::Deleted => !self.working_on_left,
            ChangeKind::Modified => false,
        };
        let status = unit.local_status();
        let still_on_disk = !status.is_empty() && status.exists_on_disk();

        if working_side_absent && still_on_disk {
            trace!(file = %unit.local_file().display(), "absence report suppressed, file exists on disk");
            return false;
        }

        true
    }
}
