//! Integration tests for the git-json binary.
//!
//! These tests run the built binary against real Git repos and check the
//! files it writes, its output, and its exit status.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Get a command for running git-json.
fn git_json() -> Command {
    Command::cargo_bin("git-json").unwrap()
}

/// Initialise a repository with one commit in `dir`.
fn init_repo(dir: &Path) {
    run_git(dir, &["init", "-b", "main"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test User"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
    std::fs::write(dir.join("README.md"), "# Test Repo\n").unwrap();
    run_git(dir, &["add", "README.md"]);
    run_git(dir, &["commit", "-m", "Initial commit"]);
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn read_json(path: &Path) -> BTreeMap<String, String> {
    let contents = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn version_flag_works() {
    git_json()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("git-json"));
}

#[test]
fn help_mentions_manifest_tables() {
    git_json()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[tool.git-json]"));
}

#[test]
fn explicit_package_path() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    git_json()
        .current_dir(temp.path())
        .args(["--package-path", "custom-dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated git info:"))
        .stdout(predicate::str::contains("git.json"));

    temp.child("custom-dir/git.json").assert(predicate::path::is_file());
    temp.child("resources").assert(predicate::path::missing());

    let json = read_json(&temp.path().join("custom-dir/git.json"));
    assert_eq!(json.len(), 25);
    assert_eq!(json["git.branch"], "main");
}

#[test]
fn default_path_without_manifest_is_resources() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    git_json().current_dir(temp.path()).assert().success();

    temp.child("resources/git.json")
        .assert(predicate::path::is_file());
}

#[test]
fn cwd_flag_sets_repository_context() {
    let repo = TempDir::new().unwrap();
    init_repo(repo.path());
    let elsewhere = TempDir::new().unwrap();

    git_json()
        .current_dir(elsewhere.path())
        .arg("--cwd")
        .arg(repo.path())
        .assert()
        .success();

    let json = read_json(&repo.path().join("resources/git.json"));
    assert_eq!(json["git.commit.message.short"], "Initial commit");
    elsewhere
        .child("resources")
        .assert(predicate::path::missing());
}

#[test]
fn manifest_lists_every_output_directory() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    temp.child("pyproject.toml")
        .write_str("[tool.git-json]\npath = [\"one\", \"two/nested\"]\n")
        .unwrap();

    git_json().current_dir(temp.path()).assert().success();

    temp.child("one/git.json").assert(predicate::path::is_file());
    temp.child("two/nested/git.json")
        .assert(predicate::path::is_file());
    temp.child("resources").assert(predicate::path::missing());
}

#[test]
fn cargo_manifest_metadata_is_read() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    temp.child("Cargo.toml")
        .write_str(
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n\
             [package.metadata.git-json]\npath = \"meta\"\n",
        )
        .unwrap();

    git_json().current_dir(temp.path()).assert().success();

    temp.child("meta/git.json").assert(predicate::path::is_file());
}

#[test]
fn failed_default_directory_does_not_stop_others() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    temp.child("blocker").write_str("not a directory").unwrap();
    temp.child("pyproject.toml")
        .write_str("[tool.git-json]\npath = [\"first\", \"blocker/out\", \"last\"]\n")
        .unwrap();

    git_json()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("1 of 3"));

    temp.child("first/git.json").assert(predicate::path::is_file());
    temp.child("last/git.json").assert(predicate::path::is_file());
}

#[test]
fn missing_git_still_succeeds() {
    let temp = TempDir::new().unwrap();

    git_json()
        .current_dir(temp.path())
        .args(["--git", "/nonexistent/bin/git", "-p", "out"])
        .assert()
        .success();

    let json = read_json(&temp.path().join("out/git.json"));
    assert_eq!(json.len(), 25);
    assert_eq!(json["git.commit.id"], "");
    assert_eq!(json["git.build.version"], "1.0.0");
    assert_eq!(json["git.dirty"], "false");
}

#[test]
fn build_host_needs_no_hostname_binary() {
    let temp = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();

    git_json()
        .current_dir(temp.path())
        .env_clear()
        .env("PATH", empty_path.path())
        .args(["--git", "/nonexistent/bin/git", "-p", "out"])
        .assert()
        .success();

    let json = read_json(&temp.path().join("out/git.json"));
    assert!(!json["git.build.host"].is_empty(), "build host empty");
}

#[test]
fn quiet_suppresses_output() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    git_json()
        .current_dir(temp.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn repeated_runs_overwrite() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());

    git_json().current_dir(temp.path()).assert().success();
    std::fs::write(temp.path().join("new.txt"), "x").unwrap();
    run_git(temp.path(), &["add", "new.txt"]);
    run_git(temp.path(), &["commit", "-m", "Second"]);
    git_json().current_dir(temp.path()).assert().success();

    let json = read_json(&temp.path().join("resources/git.json"));
    assert_eq!(json["git.total.commit.count"], "2");
    assert_eq!(json["git.commit.message.short"], "Second");
}
