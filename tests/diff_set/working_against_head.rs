use crate::common::harness::{Harness, LOCAL_EDITS, kinds, local_edits, unit};
use diffset::artifacts::diff::diff_unit::{ContentLocator, DiffUnit, DiffUnitFactory, SideContent};
use diffset::artifacts::diff::path_change::{ChangeKind, PathChange};
use diffset::artifacts::diff_set::reconciler::WorkingCopyOverrides;
use diffset::artifacts::status::local_status::LocalStatus;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

#[rstest]
fn local_edits_and_remote_deletions_are_both_reported(local_edits: Harness) {
    let units = local_edits.build("WORKING", "HEAD");

    assert_eq!(
        kinds(&units),
        vec![
            ("/proj/a.txt".to_string(), ChangeKind::Modified),
            ("/proj/b.txt".to_string(), ChangeKind::Deleted),
        ]
    );

    let a = unit(&units, "/proj/a.txt");
    assert_eq!(a.local_status(), LocalStatus::MODIFIED_LOCALLY);
    assert_eq!(a.left_label(), "Working Copy");
    assert_eq!(a.right_label(), "HEAD");

    let b = unit(&units, "/proj/b.txt");
    assert_eq!(
        b.left_locator(),
        Some(&ContentLocator::Working(PathBuf::from("/proj/b.txt")))
    );
    assert_eq!(b.right_locator(), None);
}

#[rstest]
fn head_to_working_reports_the_file_as_added_locally(local_edits: Harness) {
    let units = local_edits.build("HEAD", "WORKING");

    let b = unit(&units, "/proj/b.txt");
    assert_eq!(b.kind(), ChangeKind::Added);
    assert_eq!(b.left_locator(), None);
    assert_eq!(b.right_label(), "Working Copy");
}

#[rstest]
fn missing_paths_are_looked_up_once(local_edits: Harness) {
    local_edits.build("WORKING", "HEAD");

    // root, a.txt and b.txt at HEAD
    assert_eq!(local_edits.repository.info_calls(), 3);
}

#[rstest]
#[case("HEAD", "WORKING")]
#[case("WORKING", "HEAD")]
fn files_removed_on_both_sides_are_not_reported(#[case] left: &str, #[case] right: &str) {
    let harness = Harness::parse(&LOCAL_EDITS.replace(
        "status = \"uptodate|remote-removed\"",
        "status = \"removed|remote-removed\"",
    ));

    let units = harness.build(left, right);

    assert_eq!(
        kinds(&units),
        vec![("/proj/a.txt".to_string(), ChangeKind::Modified)]
    );
}

fn local_unit(file: &str, kind: ChangeKind, status: LocalStatus) -> DiffUnit {
    DiffUnitFactory::build(
        &PathChange::root(kind, false),
        PathBuf::from(file),
        SideContent::new(Some(ContentLocator::Working(file.into())), "Working Copy".into()),
        SideContent::new(None, "HEAD".into()),
        status,
    )
}

#[rstest]
fn caller_supplied_overrides_replace_the_collected_ones(local_edits: Harness) {
    let overrides = [
        local_unit("/proj/b.txt", ChangeKind::Modified, LocalStatus::MODIFIED_LOCALLY),
        local_unit("/proj/scratch.txt", ChangeKind::Deleted, LocalStatus::NEW_LOCALLY),
    ]
    .into_iter()
    .collect::<WorkingCopyOverrides>();

    let outcome = local_edits
        .builder("WORKING", "HEAD")
        .with_overrides(overrides)
        .build()
        .unwrap();
    let units = outcome.units().unwrap();

    assert_eq!(
        kinds(units),
        vec![
            ("/proj/scratch.txt".to_string(), ChangeKind::Deleted),
            ("/proj/b.txt".to_string(), ChangeKind::Deleted),
        ]
    );
    assert_eq!(units[1].local_status(), LocalStatus::MODIFIED_LOCALLY);
}
