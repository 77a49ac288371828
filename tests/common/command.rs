use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::PathBuf;

#[fixture]
pub fn scenario_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn write_scenario(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file = dir.child(name);
    file.write_str(content).expect("Failed to write scenario");

    file.path().to_path_buf()
}

pub fn run_diffset_command(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("diffset").expect("Failed to find diffset binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").args(args);

    cmd
}
