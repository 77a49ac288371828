use crate::common::harness::{Harness, LOCAL_EDITS, kinds, local_edits, unit};
use diffset::artifacts::diff::diff_unit::ContentLocator;
use diffset::artifacts::diff::path_change::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

#[rstest]
fn path_missing_at_head_is_added_from_the_base_perspective(local_edits: Harness) {
    let units = local_edits.build("HEAD", "BASE");

    assert_eq!(
        kinds(&units),
        vec![("/proj/b.txt".to_string(), ChangeKind::Added)]
    );

    let b = unit(&units, "/proj/b.txt");
    assert_eq!(b.left_locator(), None);
    assert_eq!(
        b.right_locator(),
        Some(&ContentLocator::Pristine {
            file: PathBuf::from("/proj/b.txt"),
            revision: 1
        })
    );
    assert_eq!(b.left_label(), "HEAD");
    assert_eq!(b.right_label(), "Base (r1)");
}

#[rstest]
fn base_to_head_reports_the_remote_deletion(local_edits: Harness) {
    let units = local_edits.build("BASE", "HEAD");

    assert_eq!(
        kinds(&units),
        vec![("/proj/b.txt".to_string(), ChangeKind::Deleted)]
    );
    assert_eq!(units[0].right_locator(), None);
}

#[rstest]
fn local_modifications_are_invisible_without_the_working_copy(local_edits: Harness) {
    let units = local_edits.build("BASE", "HEAD");

    assert!(units.iter().all(|unit| unit.local_file() != Path::new("/proj/a.txt")));
    assert_eq!(local_edits.repository.summarize_calls(), 2);
}

#[test]
fn uncommitted_additions_are_skipped() {
    let harness = Harness::parse(&format!(
        r#"{LOCAL_EDITS}
[[local]]
path = "new.txt"
status = "added"
"#
    ));

    let units = harness.build("BASE", "HEAD");

    assert_eq!(
        kinds(&units),
        vec![("/proj/b.txt".to_string(), ChangeKind::Deleted)]
    );
}

#[test]
fn files_changed_upstream_are_modified() {
    let harness = Harness::parse(
        r#"
repository = "svn://host/repo"

[working_copy]
root = "/proj"
url = "svn://host/repo/trunk"

[[revisions]]
files = { "trunk/a.txt" = "one" }

[[revisions]]
files = { "trunk/a.txt" = "one, edited upstream" }

[[local]]
path = "a.txt"
status = "uptodate|remote-modified"
revision = 1
"#,
    );

    let units = harness.build("BASE", "HEAD");

    assert_eq!(
        kinds(&units),
        vec![("/proj/a.txt".to_string(), ChangeKind::Modified)]
    );
    assert_eq!(units[0].left_label(), "Base (r1)");
    assert_eq!(units[0].right_label(), "HEAD");
}
