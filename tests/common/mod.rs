//! Common test utilities and helpers
//!
//! Fixtures are real repositories built with the `git` command line inside
//! temporary directories. Global and system git configuration are ignored so
//! the host setup cannot leak into the tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir` and panic with its output on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "init.defaultBranch=main",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .output()
        .expect("git must be installed to run these tests");
    assert!(
        output.status.success(),
        "git {:?} failed in {}:\n{}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Temporary directory with its canonical path
pub fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temporary directory");
    let path = fs::canonicalize(dir.path()).expect("canonical temporary directory");
    (dir, path)
}

/// Repository with one commit on `main`
pub fn init_repo(path: &Path) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    git(path, &["init", "--quiet"]);
    commit_file(path, "README.md", "# fixture\n", "Initial commit");
    path.to_path_buf()
}

pub fn init_bare(path: &Path) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    git(path, &["init", "--quiet", "--bare"]);
    path.to_path_buf()
}

pub fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    let file = repo.join(name);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file, content).unwrap();
    git(repo, &["add", name]);
    git(repo, &["commit", "--quiet", "-m", message]);
}

/// Clone `source` into `target`; `main` tracks `origin/main`
pub fn clone_repo(source: &Path, target: &Path) -> PathBuf {
    let parent = target.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    git(
        parent,
        &[
            "clone",
            "--quiet",
            &source.to_string_lossy(),
            &target.to_string_lossy(),
        ],
    );
    target.to_path_buf()
}

/// Origin plus a clone, each with one commit the other lacks, fetched so
/// the clone sees both sides
pub fn diverged_pair(root: &Path) -> (PathBuf, PathBuf) {
    let origin = init_repo(&root.join("origin"));
    let clone = clone_repo(&origin, &root.join("clone"));
    commit_file(&origin, "upstream.txt", "upstream\n", "Upstream work");
    commit_file(&clone, "local.txt", "local\n", "Local work");
    git(&clone, &["fetch", "--quiet"]);
    (origin, clone)
}
