//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn merge_tree() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("merge-tree"))
}

#[test]
fn test_cli_version() {
    let mut cmd = merge_tree();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("merge-tree"));
}

#[test]
fn test_cli_help() {
    let mut cmd = merge_tree();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Merge every text file"))
        .stdout(predicate::str::contains("--encoding"))
        .stdout(predicate::str::contains("--exclude-dir"));
}

#[test]
fn test_merges_explicit_root_into_default_output() {
    let tree = TempDir::new().expect("tmp");
    fs::write(tree.path().join("a.txt"), "hello").expect("write a");
    fs::create_dir_all(tree.path().join("sub")).expect("mkdir sub");
    fs::write(tree.path().join("sub/b.txt"), "world").expect("write b");

    let mut cmd = merge_tree();
    cmd.arg(tree.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Processing file:"))
        .stdout(predicate::str::contains("Skipping output file:"))
        .stdout(predicate::str::contains("Done!"));

    let merged = fs::read_to_string(tree.path().join("output_merged_files.txt")).expect("output");
    assert!(merged.contains("hello"));
    assert!(merged.contains("world"));
    assert!(merged.find("hello") < merged.find("world"));
}

#[test]
fn test_quiet_hides_per_file_progress() {
    let tree = TempDir::new().expect("tmp");
    fs::write(tree.path().join("a.txt"), "hello").expect("write a");
    let out = TempDir::new().expect("out");

    let mut cmd = merge_tree();
    cmd.arg(tree.path()).arg("--quiet").arg("-o").arg(out.path().join("m.txt"));
    cmd.assert().success().stdout(predicate::str::contains("Processing file:").not());
}

#[test]
fn test_missing_root_reports_error_with_normal_exit() {
    let tree = TempDir::new().expect("tmp");
    let missing = tree.path().join("missing");

    let mut cmd = merge_tree();
    cmd.arg(&missing);
    cmd.assert().success().stderr(predicate::str::contains("does not exist"));
    assert!(!missing.join("output_merged_files.txt").exists());
}

#[test]
fn test_rejects_unknown_encoding() {
    let tree = TempDir::new().expect("tmp");
    let mut cmd = merge_tree();
    cmd.arg(tree.path()).args(["--encoding", "klingon"]);
    cmd.assert().failure().stderr(predicate::str::contains("Unknown encoding label"));
}

#[test]
fn test_extra_exclusions_and_report() {
    let tree = TempDir::new().expect("tmp");
    fs::create_dir_all(tree.path().join("target")).expect("mkdir target");
    fs::write(tree.path().join("target/junk.txt"), "junk").expect("write junk");
    fs::write(tree.path().join("keep.txt"), "keep").expect("write keep");
    let out = TempDir::new().expect("out");
    let report = out.path().join("report.json");

    let mut cmd = merge_tree();
    cmd.arg(tree.path())
        .args(["--exclude-dir", "target,dist", "--no-timestamp", "-o"])
        .arg(out.path().join("merged.txt"))
        .arg("--report")
        .arg(&report);
    cmd.assert().success();

    let merged = fs::read_to_string(out.path().join("merged.txt")).expect("merged");
    assert!(!merged.contains("junk"));

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report).expect("report")).expect("json");
    assert_eq!(parsed["stats"]["files_merged"], serde_json::json!(1));
    assert_eq!(parsed["stats"]["dirs_pruned"], serde_json::json!(1));
    assert!(parsed.get("generated_at").is_none());
}

#[test]
fn test_completions() {
    let mut cmd = merge_tree();
    cmd.args(["--completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("merge-tree"));
}

#[cfg(unix)]
#[test]
fn test_read_failure_is_reported_once() {
    let tree = TempDir::new().expect("tmp");
    std::os::unix::fs::symlink(tree.path().join("vanished.txt"), tree.path().join("dangling.txt"))
        .expect("symlink");
    let out = TempDir::new().expect("out");

    let mut cmd = merge_tree();
    cmd.arg(tree.path()).arg("-o").arg(out.path().join("merged.txt"));
    cmd.env_remove("RUST_LOG");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("*** Could not read file '"))
        .stderr(predicate::str::contains("Could not read").not());
}
