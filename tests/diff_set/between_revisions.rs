use crate::common::harness::{Harness, completed, sorted_kinds, tree_changes, unit};
use diffset::artifacts::diff::diff_unit::{ContentLocator, DiffUnit};
use diffset::artifacts::diff::path_change::ChangeKind;
use diffset::artifacts::diff_set::builder::{BuildOptions, DiffSetBuilder};
use diffset::artifacts::revision::endpoint::{RemoteEndpoint, RevisionEndpoint};
use diffset::artifacts::revision::repo_url::RepoUrl;
use diffset::artifacts::revision::revision::{RemoteRevision, Revision};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;

fn entry(path: &str, kind: ChangeKind) -> (String, ChangeKind) {
    (path.to_string(), kind)
}

#[rstest]
fn deletions_below_a_deleted_directory_are_shadowed(tree_changes: Harness) {
    let units = tree_changes.build("1", "HEAD");

    assert_eq!(
        sorted_kinds(&units),
        vec![
            entry("/proj/keep.txt", ChangeKind::Modified),
            entry("/proj/lib", ChangeKind::Deleted),
            entry("/proj/lib/sub/b.txt", ChangeKind::Deleted),
            entry("/proj/new.txt", ChangeKind::Added),
        ]
    );
    assert!(unit(&units, "/proj/lib").is_directory());
}

#[rstest]
fn the_reverted_heuristic_can_be_disabled(tree_changes: Harness) {
    let outcome = tree_changes
        .builder("1", "HEAD")
        .with_options(BuildOptions {
            keep_locally_reverted_deletions: false,
            ..BuildOptions::default()
        })
        .build()
        .unwrap();

    assert_eq!(
        sorted_kinds(&completed(outcome)),
        vec![
            entry("/proj/keep.txt", ChangeKind::Modified),
            entry("/proj/lib", ChangeKind::Deleted),
            entry("/proj/new.txt", ChangeKind::Added),
        ]
    );
}

#[rstest]
fn one_summary_answers_the_whole_tree(tree_changes: Harness) {
    tree_changes.build("1", "HEAD");

    assert_eq!(tree_changes.repository.summarize_calls(), 1);
    assert_eq!(tree_changes.repository.info_calls(), 2);
}

#[rstest]
fn both_sides_point_into_the_repository(tree_changes: Harness) {
    let units = tree_changes.build("r1", "HEAD");

    let keep = unit(&units, "/proj/keep.txt");
    let location = RepoUrl::try_parse("svn://host/repo/trunk/keep.txt").unwrap();
    assert_eq!(
        keep.left_locator(),
        Some(&ContentLocator::Remote(RemoteEndpoint::new(
            location.clone(),
            RemoteRevision::Number(1)
        )))
    );
    assert_eq!(
        keep.right_locator(),
        Some(&ContentLocator::Remote(RemoteEndpoint::new(
            location,
            RemoteRevision::Head
        )))
    );
    assert_eq!(keep.left_label(), "r1");
    assert_eq!(keep.right_label(), "HEAD");
}

#[rstest]
#[case("1", "HEAD", ChangeKind::Deleted)]
#[case("HEAD", "1", ChangeKind::Added)]
fn root_missing_on_one_side_is_a_single_unit(
    tree_changes: Harness,
    #[case] left: &str,
    #[case] right: &str,
    #[case] kind: ChangeKind,
) {
    let outcome = tree_changes
        .builder(left, right)
        .with_roots(["/proj/lib"])
        .build()
        .unwrap();
    let units = completed(outcome);

    assert_eq!(sorted_kinds(&units), vec![entry("/proj/lib", kind)]);
    assert!(units[0].is_directory());
    assert_eq!(tree_changes.repository.summarize_calls(), 0);
}

#[rstest]
fn roots_absent_on_both_sides_yield_nothing(tree_changes: Harness) {
    let outcome = tree_changes
        .builder("1", "HEAD")
        .with_roots(["/proj/nowhere"])
        .build()
        .unwrap();

    assert!(completed(outcome).is_empty());
}

#[rstest]
#[case(&["/proj/lib", "/proj"])]
#[case(&["/proj", "/proj/lib"])]
fn overlapping_roots_report_each_path_once(tree_changes: Harness, #[case] roots: &[&str]) {
    let outcome = tree_changes
        .builder("1", "HEAD")
        .with_roots(roots.iter().copied())
        .build()
        .unwrap();

    assert_eq!(
        sorted_kinds(&completed(outcome)),
        vec![
            entry("/proj/keep.txt", ChangeKind::Modified),
            entry("/proj/lib", ChangeKind::Deleted),
            entry("/proj/lib/sub/b.txt", ChangeKind::Deleted),
            entry("/proj/new.txt", ChangeKind::Added),
        ]
    );
}

#[test]
fn branches_can_be_compared() {
    let harness = Harness::parse(
        r#"
repository = "svn://host/repo"

[working_copy]
root = "/proj"
url = "svn://host/repo/trunk"

[[revisions]]
files = { "trunk/keep.txt" = "keep", "branches/stable/keep.txt" = "keep" }

[[revisions]]
files = { "trunk/keep.txt" = "kept", "trunk/new.txt" = "new", "branches/stable/keep.txt" = "keep" }
"#,
    );
    let stable = RevisionEndpoint::new(
        RepoUrl::try_parse("svn://host/repo/branches/stable").unwrap(),
        Revision::Head,
    );

    let builder = DiffSetBuilder::new(
        harness.repository.clone(),
        harness.status_cache.clone(),
        harness.working_copy.clone(),
        stable,
        harness.endpoint("HEAD"),
    );

    assert_eq!(
        sorted_kinds(&completed(builder.build().unwrap())),
        vec![
            entry("/proj/keep.txt", ChangeKind::Modified),
            entry("/proj/new.txt", ChangeKind::Added),
        ]
    );
}

#[rstest]
fn caller_ordering_is_applied(tree_changes: Harness) {
    let outcome = tree_changes
        .builder("1", "HEAD")
        .with_ordering(Arc::new(|a: &DiffUnit, b: &DiffUnit| {
            b.local_file().cmp(a.local_file())
        }))
        .build()
        .unwrap();

    let files = completed(outcome)
        .iter()
        .map(|unit| unit.local_file().display().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        files,
        vec![
            "/proj/new.txt",
            "/proj/lib/sub/b.txt",
            "/proj/lib",
            "/proj/keep.txt"
        ]
    );
}
