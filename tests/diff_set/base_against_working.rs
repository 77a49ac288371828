use crate::common::harness::{Harness, LOCAL_EDITS, kinds, local_edits, unit};
use diffset::artifacts::diff::diff_unit::ContentLocator;
use diffset::artifacts::diff::path_change::ChangeKind;
use diffset::artifacts::status::local_status::LocalStatus;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

#[rstest]
fn only_the_locally_modified_file_is_reported(local_edits: Harness) {
    let units = local_edits.build("BASE", "WORKING");

    assert_eq!(
        kinds(&units),
        vec![("/proj/a.txt".to_string(), ChangeKind::Modified)]
    );

    let a = unit(&units, "/proj/a.txt");
    assert_eq!(a.local_status(), LocalStatus::MODIFIED_LOCALLY);
    assert_eq!(a.left_label(), "Base (r1)");
    assert_eq!(a.right_label(), "Working Copy");
    assert_eq!(
        a.left_locator(),
        Some(&ContentLocator::Pristine {
            file: PathBuf::from("/proj/a.txt"),
            revision: 1
        })
    );
    assert_eq!(
        a.right_locator(),
        Some(&ContentLocator::Working(PathBuf::from("/proj/a.txt")))
    );
}

#[rstest]
fn the_repository_is_never_queried(local_edits: Harness) {
    local_edits.build("BASE", "WORKING");

    assert_eq!(local_edits.repository.remote_calls(), 0);
}

#[rstest]
fn working_on_the_left_mirrors_the_sides(local_edits: Harness) {
    let units = local_edits.build("WORKING", "BASE");

    let a = unit(&units, "/proj/a.txt");
    assert_eq!(a.kind(), ChangeKind::Modified);
    assert_eq!(a.left_label(), "Working Copy");
    assert_eq!(a.right_label(), "Base (r1)");
}

#[test]
fn local_additions_are_reported_as_added() {
    let harness = Harness::parse(&format!(
        r#"{LOCAL_EDITS}
[[local]]
path = "copy.txt"
status = "added"
revision = 1
copied = true
url = "svn://host/repo/trunk/a.txt"

[[local]]
path = "new.txt"
status = "new"

[[local]]
path = "build.log"
status = "new|ignored"
"#
    ));

    let units = harness.build("BASE", "WORKING");

    assert_eq!(
        kinds(&units),
        vec![
            ("/proj/new.txt".to_string(), ChangeKind::Added),
            ("/proj/copy.txt".to_string(), ChangeKind::Added),
            ("/proj/a.txt".to_string(), ChangeKind::Modified),
        ]
    );

    let copy = unit(&units, "/proj/copy.txt");
    assert_eq!(copy.left_locator(), None);
    assert_eq!(
        copy.right_locator(),
        Some(&ContentLocator::Working(PathBuf::from("/proj/copy.txt")))
    );
    assert_eq!(harness.repository.remote_calls(), 0);
}

#[test]
fn local_removals_are_reported_as_deleted() {
    let harness = Harness::parse(&format!(
        r#"{LOCAL_EDITS}
[[local]]
path = "gone.txt"
status = "removed"
revision = 1
"#
    ));

    let units = harness.build("BASE", "WORKING");

    let gone = unit(&units, "/proj/gone.txt");
    assert_eq!(gone.kind(), ChangeKind::Deleted);
    assert_eq!(gone.right_locator(), None);
    assert_eq!(gone.right_label(), "Working Copy");
}

#[rstest]
fn scoped_roots_limit_the_reported_paths(local_edits: Harness) {
    let outcome = local_edits
        .builder("BASE", "WORKING")
        .with_roots(["/proj/b.txt"])
        .build()
        .unwrap();

    assert_eq!(outcome.units().map(<[_]>::len), Some(0));
}
