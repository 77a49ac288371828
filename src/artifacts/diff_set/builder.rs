use crate::areas::remote::{RemoteError, RemoteRepository};
use crate::areas::status_cache::LocalStatusCache;
use crate::areas::working_copy::WorkingCopy;
use crate::artifacts::cache::existence::ExistenceResolver;
use crate::artifacts::cache::summary_cache::SummaryCache;
use crate::artifacts::core::cancellation::CancellationToken;
use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::diff::diff_unit::{DiffUnit, DiffUnitFactory};
use crate::artifacts::diff::path_change::{ChangeKind, ChangeSet, Depth, PathChange, local_path};
use crate::artifacts::diff_set::mode::ComparisonMode;
use crate::artifacts::diff_set::ordering::{UnitOrdering, default_ordering};
use crate::artifacts::diff_set::reconciler::{WorkingCopyOverrides, WorkingCopyReconciler};
use crate::artifacts::diff_set::shadowing::DeletionShadow;
use crate::artifacts::diff_set::side::ResolvedSide;
use crate::artifacts::revision::endpoint::{RemoteEndpoint, RevisionEndpoint};
use crate::artifacts::revision::revision::Revision;
use crate::artifacts::status::local_status::{LocalStatus, LocalStatusInfo};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Report a deletion below an already deleted directory when the path still has an
    /// assigned revision and exists on disk.
    pub keep_locally_reverted_deletions: bool,
    /// Ask the repository about directories as well as files.
    pub include_directories: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            keep_locally_reverted_deletions: true,
            include_directories: true,
        }
    }
}

/// Result of a build that did not fail. A canceled build never yields partial results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSetOutcome {
    Completed(Vec<DiffUnit>),
    Canceled,
}

impl DiffSetOutcome {
    pub fn units(&self) -> Option<&[DiffUnit]> {
        match self {
            DiffSetOutcome::Completed(units) => Some(units),
            DiffSetOutcome::Canceled => None,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, DiffSetOutcome::Canceled)
    }
}

/// Why a build stopped early.
enum Interrupt {
    Canceled,
    Failed(DiffSetError),
}

impl From<DiffSetError> for Interrupt {
    fn from(error: DiffSetError) -> Self {
        Interrupt::Failed(error)
    }
}

impl From<RemoteError> for Interrupt {
    fn from(error: RemoteError) -> Self {
        Interrupt::Failed(error.into())
    }
}

type Step<T> = Result<T, Interrupt>;

/// Everything a single build owns; dropped with the build.
struct BuildState<'b> {
    cache: SummaryCache,
    existence: ExistenceResolver<'b>,
    visited: HashSet<PathBuf>,
    /// Local paths the repository comparison found on neither side.
    absent: BTreeSet<PathBuf>,
    units: Vec<DiffUnit>,
}

impl<'b> BuildState<'b> {
    fn new(remote: &'b dyn RemoteRepository) -> Self {
        Self {
            cache: SummaryCache::new(),
            existence: ExistenceResolver::new(remote),
            visited: HashSet::new(),
            absent: BTreeSet::new(),
            units: Vec::new(),
        }
    }
}

/// Computes the set of diff units between two endpoints over one or more local roots.
///
/// Every call to [`build`](Self::build) starts from an empty summary cache and missing
/// set, so concurrent or repeated builds never share state. All remote calls of one
/// build are issued sequentially.
pub struct DiffSetBuilder {
    remote: Arc<dyn RemoteRepository>,
    status_cache: Arc<dyn LocalStatusCache>,
    working_copy: WorkingCopy,
    left: RevisionEndpoint,
    right: RevisionEndpoint,
    roots: Vec<PathBuf>,
    overrides: Option<WorkingCopyOverrides>,
    options: BuildOptions,
    ordering: UnitOrdering,
    cancellation: CancellationToken,
}

impl DiffSetBuilder {
    pub fn new(
        remote: Arc<dyn RemoteRepository>,
        status_cache: Arc<dyn LocalStatusCache>,
        working_copy: WorkingCopy,
        left: RevisionEndpoint,
        right: RevisionEndpoint,
    ) -> Self {
        let roots = vec![working_copy.root().to_path_buf()];

        Self {
            remote,
            status_cache,
            working_copy,
            left,
            right,
            roots,
            overrides: None,
            options: BuildOptions::default(),
            ordering: default_ordering(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Local paths to compare; defaults to the working copy root.
    pub fn with_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the overrides otherwise collected from the status cache.
    pub fn with_overrides(mut self, overrides: WorkingCopyOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_ordering(mut self, ordering: UnitOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn build(&self) -> DiffSetResult<DiffSetOutcome> {
        match self.run() {
            Ok(units) => Ok(DiffSetOutcome::Completed(units)),
            Err(Interrupt::Canceled) => {
                info!(left = %self.left, right = %self.right, "diff set build canceled");
                Ok(DiffSetOutcome::Canceled)
            }
            Err(Interrupt::Failed(e)) => Err(e),
        }
    }

    fn run(&self) -> Step<Vec<DiffUnit>> {
        let mode = ComparisonMode::of(&self.left, &self.right)?;
        for root in &self.roots {
            self.working_copy.relative_path(root)?;
        }
        info!(left = %self.left, right = %self.right, ?mode, roots = self.roots.len(), "building diff set");

        let mut state = BuildState::new(self.remote.as_ref());
        if mode != ComparisonMode::Identical {
            for root in &self.roots {
                self.checkpoint()?;
                if mode.is_per_path() {
                    self.compare_paths(&mut state, root, mode)?;
                } else {
                    self.compare_tree(&mut state, root)?;
                }
                self.checkpoint()?;
            }
        }
        debug!(
            units = state.units.len(),
            cached_summaries = state.cache.len(),
            missing = state.existence.missing().len(),
            "remote comparison finished"
        );

        let absent = state.absent;
        let mut units = state.units;
        if mode.involves_working_copy()
            && let Some(reconciler) = WorkingCopyReconciler::for_endpoints(&self.left, &self.right)
        {
            let collected;
            let overrides = match &self.overrides {
                Some(overrides) => overrides,
                None => {
                    collected = WorkingCopyOverrides::collect(
                        self.status_cache.as_ref(),
                        &self.working_copy,
                        &self.roots,
                        &self.left,
                        &self.right,
                    );
                    &collected
                }
            };
            units = reconciler.reconcile(units, overrides, &absent);
        }

        units.sort_by(|a, b| (self.ordering)(a, b));
        self.checkpoint()?;

        info!(units = units.len(), "diff set built");
        Ok(units)
    }

    /// Walks every locally known path below `root`, one depth-limited query per path.
    fn compare_paths(&self, state: &mut BuildState<'_>, root: &Path, mode: ComparisonMode) -> Step<()> {
        let files = self.status_cache.list_files(root);
        debug!(root = %root.display(), files = files.len(), "comparing local paths");

        for file in files {
            if !state.visited.insert(file.clone()) {
                continue;
            }
            let Some(info) = self.status_cache.status_of(&file) else {
                continue;
            };
            if info.status().is_excluded() {
                trace!(file = %file.display(), "excluded from version control");
                continue;
            }
            if info.is_directory() && !self.options.include_directories {
                continue;
            }
            if info.revision().is_none() && !mode.involves_working_copy() {
                trace!(file = %file.display(), "uncommitted addition has no history to compare");
                continue;
            }

            let relative = self.working_copy.relative_path(&file)?;
            let left = ResolvedSide::for_local(&self.left, &relative, &info);
            let right = ResolvedSide::for_local(&self.right, &relative, &info);

            let Some(kind) = self.compare_path(state, &left, &right, &info)? else {
                trace!(file = %file.display(), "absent on both sides");
                state.absent.insert(file);
                continue;
            };
            // Unchanged paths only matter when a local override may claim them.
            if kind == ChangeKind::Unchanged && !mode.involves_working_copy() {
                continue;
            }

            let change = PathChange::root(kind, info.is_directory());
            self.emit(state, file, &change, &left, &right, info.status())?;
        }

        Ok(())
    }

    /// Depth-limited summaries are stored with path coverage only, so sibling paths
    /// never answer each other from the cache; each remote pair costs its own queries.
    fn compare_path(
        &self,
        state: &mut BuildState<'_>,
        left: &ResolvedSide,
        right: &ResolvedSide,
        info: &LocalStatusInfo,
    ) -> Step<Option<ChangeKind>> {
        if let (Some(l), Some(r)) = (left.remote(), right.remote())
            && l == r
        {
            return Ok(Some(ChangeKind::Unchanged));
        }

        let left_present = self.is_present(state, left, info)?;
        let right_present = self.is_present(state, right, info)?;
        let kind = ChangeKind::from_presence(left_present, right_present);

        match (kind, left.remote(), right.remote()) {
            (Some(ChangeKind::Modified), Some(l), Some(r)) => self.summarize_path(state, l, r).map(Some),
            _ => Ok(kind),
        }
    }

    fn is_present(&self, state: &mut BuildState<'_>, side: &ResolvedSide, info: &LocalStatusInfo) -> Step<bool> {
        match (side.revision(), side.remote()) {
            (Revision::Working, _) => Ok(info.status().exists_on_disk()),
            (Revision::Base, remote) => Ok(remote.is_some()),
            (Revision::Head | Revision::Number(_), Some(remote)) => {
                self.checkpoint()?;
                Ok(state.existence.exists(remote)?)
            }
            (Revision::Head | Revision::Number(_), None) => Ok(false),
        }
    }

    fn summarize_path(
        &self,
        state: &mut BuildState<'_>,
        left: &RemoteEndpoint,
        right: &RemoteEndpoint,
    ) -> Step<ChangeKind> {
        let changes = self.summarize(state, left, right, Depth::Empty)?;

        if let Some(stray) = changes.iter().find(|change| !change.is_root()) {
            return Err(DiffSetError::InconsistentState(format!(
                "depth-limited summary of {left} reported descendant '{}'",
                stray.relative_path()
            ))
            .into());
        }

        match changes.first().map(PathChange::kind) {
            None => Ok(ChangeKind::Unchanged),
            Some(kind @ (ChangeKind::Modified | ChangeKind::Unchanged)) => Ok(kind),
            Some(kind) => Err(DiffSetError::InconsistentState(format!(
                "summary reports {kind:?} for {left}, which exists on both sides"
            ))
            .into()),
        }
    }

    /// Compares the whole tree below `root` with a single recursive query.
    fn compare_tree(&self, state: &mut BuildState<'_>, root: &Path) -> Step<()> {
        let relative = self.working_copy.relative_path(root)?;
        let left = ResolvedSide::for_tree(&self.left, &relative)?;
        let right = ResolvedSide::for_tree(&self.right, &relative)?;
        let (left_remote, right_remote) = match (left.remote(), right.remote()) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                return Err(DiffSetError::InvalidEndpoint(format!(
                    "{root:?} has no repository location on both sides"
                ))
                .into());
            }
        };

        self.checkpoint()?;
        let left_info = state.existence.resolve(left_remote)?;
        self.checkpoint()?;
        let right_info = state.existence.resolve(right_remote)?;

        match (&left_info, &right_info) {
            (None, None) => {
                debug!(root = %root.display(), "root exists on neither side");
                return Ok(());
            }
            (Some(_), Some(_)) => {}
            (existing, _) => {
                let kind = if existing.is_some() {
                    ChangeKind::Deleted
                } else {
                    ChangeKind::Added
                };
                let is_directory = left_info
                    .as_ref()
                    .or(right_info.as_ref())
                    .is_some_and(|info| info.is_directory());
                if !state.visited.insert(root.to_path_buf()) {
                    return Ok(());
                }

                let status = self
                    .status_cache
                    .status_of(root)
                    .map(|info| info.status())
                    .unwrap_or_else(LocalStatus::empty);
                let change = PathChange::root(kind, is_directory);
                return self.emit(state, root.to_path_buf(), &change, &left, &right, status);
            }
        }

        let changes = self.summarize(state, left_remote, right_remote, Depth::Infinity)?;
        debug!(root = %root.display(), changes = changes.len(), "tree summary");

        let mut shadow = DeletionShadow::new(self.options.keep_locally_reverted_deletions);
        for change in changes.iter().filter(|change| change.kind() != ChangeKind::Unchanged) {
            let file = local_path(root, change.relative_path());
            let local = self.status_cache.status_of(&file);

            if !shadow.admit(change, local.as_ref()) {
                continue;
            }
            if !state.visited.insert(file.clone()) {
                continue;
            }

            let status = local.map(|info| info.status()).unwrap_or_else(LocalStatus::empty);
            self.emit(
                state,
                file,
                change,
                &left.descend(change.relative_path()),
                &right.descend(change.relative_path()),
                status,
            )?;
        }

        Ok(())
    }

    fn summarize(
        &self,
        state: &mut BuildState<'_>,
        left: &RemoteEndpoint,
        right: &RemoteEndpoint,
        depth: Depth,
    ) -> Step<ChangeSet> {
        if let Some(changes) = state.cache.get(left, right, depth) {
            return Ok(changes);
        }

        self.checkpoint()?;
        debug!(%left, %right, ?depth, "remote diff summarize");
        let changes = self
            .remote
            .diff_summarize(left, right, depth, self.options.include_directories)?
            .into_iter()
            .collect::<ChangeSet>();
        state.cache.put(left, right, depth, changes.clone());

        Ok(changes)
    }

    fn emit(
        &self,
        state: &mut BuildState<'_>,
        file: PathBuf,
        change: &PathChange,
        left: &ResolvedSide,
        right: &ResolvedSide,
        status: LocalStatus,
    ) -> Step<()> {
        self.checkpoint()?;

        let unit = DiffUnitFactory::build(change, file.clone(), left.content(&file), right.content(&file), status);
        trace!(file = %file.display(), kind = ?unit.kind(), "diff unit");
        state.units.push(unit);

        Ok(())
    }

    fn checkpoint(&self) -> Step<()> {
        if self.cancellation.is_canceled() {
            return Err(Interrupt::Canceled);
        }

        Ok(())
    }
}
