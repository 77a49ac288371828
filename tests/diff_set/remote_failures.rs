use crate::common::harness::{Harness, local_edits, tree_changes};
use diffset::areas::memory::MemoryRepository;
use diffset::areas::remote::{RemoteError, RemoteInfo, RemoteRepository};
use diffset::artifacts::core::error::DiffSetError;
use diffset::artifacts::diff::path_change::{ChangeKind, Depth, PathChange};
use diffset::artifacts::revision::endpoint::RemoteEndpoint;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;

/// Answers every depth-limited summary with a path below the queried one.
struct StrayRepository {
    inner: Arc<MemoryRepository>,
}

impl RemoteRepository for StrayRepository {
    fn info(&self, endpoint: &RemoteEndpoint) -> Result<RemoteInfo, RemoteError> {
        self.inner.info(endpoint)
    }

    fn diff_summarize(
        &self,
        _left: &RemoteEndpoint,
        _right: &RemoteEndpoint,
        _depth: Depth,
        _include_dirs: bool,
    ) -> Result<Vec<PathChange>, RemoteError> {
        Ok(vec![PathChange::new(
            "child.txt".to_string(),
            ChangeKind::Modified,
            false,
        )])
    }
}

fn failing(harness: &Harness, failure: RemoteError) -> Harness {
    let mut repository = MemoryRepository::new(harness.repository.root().clone());
    repository.commit([("trunk/keep.txt", "keep")]);

    Harness::new(
        Arc::new(repository.with_failure(failure)),
        harness.status_cache.clone(),
        harness.working_copy.clone(),
    )
}

#[rstest]
#[case(RemoteError::Transport("connection reset".to_string()))]
#[case(RemoteError::Server("authorization failed".to_string()))]
fn remote_failures_abort_the_build(tree_changes: Harness, #[case] failure: RemoteError) {
    let harness = failing(&tree_changes, failure.clone());

    let result = harness.builder("1", "HEAD").build();

    assert_eq!(result, Err(DiffSetError::Remote(failure)));
    assert_eq!(harness.repository.remote_calls(), 1);
}

#[rstest]
fn failures_are_not_mistaken_for_missing_paths(local_edits: Harness) {
    let harness = failing(&local_edits, RemoteError::Transport("timed out".to_string()));

    let result = harness.builder("BASE", "HEAD").build();

    assert!(matches!(result, Err(DiffSetError::Remote(RemoteError::Transport(_)))));
}

#[rstest]
fn inconsistent_summaries_abort_the_build(local_edits: Harness) {
    let remote = Arc::new(StrayRepository {
        inner: local_edits.repository.clone(),
    });

    let result = local_edits.with_remote(remote, "BASE", "HEAD").build();

    assert!(matches!(result, Err(DiffSetError::InconsistentState(_))));
}

#[rstest]
fn roots_outside_the_working_copy_are_rejected(local_edits: Harness) {
    let result = local_edits
        .builder("BASE", "WORKING")
        .with_roots(["/elsewhere"])
        .build();

    assert!(matches!(result, Err(DiffSetError::InvalidEndpoint(_))));
    assert_eq!(local_edits.repository.remote_calls(), 0);
}

#[rstest]
fn identical_endpoints_need_no_queries(local_edits: Harness) {
    let outcome = local_edits.builder("HEAD", "HEAD").build().unwrap();

    assert_eq!(outcome.units().map(<[_]>::len), Some(0));
    assert_eq!(local_edits.repository.remote_calls(), 0);
}
