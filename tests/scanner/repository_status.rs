//! Repository facts computed through the gix engine

use crate::common::{clone_repo, commit_file, diverged_pair, git, init_bare, init_repo, workspace};
use gitmeta::repository::{graph, CommitGraph, RepositoryBackend, RepositoryHandle, Upstream};
use gitmeta::scanner::{RepositoryFacts, RepositoryRecord, StatusFilter};
use std::fs;

#[test]
fn test_untracked_file_is_dirty_until_ignored() {
    let (_guard, root) = workspace();
    let repo = init_repo(&root.join("repo"));
    fs::write(repo.join("notes.txt"), "scratch\n").unwrap();

    let handle = RepositoryHandle::open(&repo).unwrap();
    assert!(handle.is_dirty(), "untracked file must make the tree dirty");

    commit_file(&repo, ".gitignore", "notes.txt\n", "Ignore notes");
    let handle = RepositoryHandle::open(&repo).unwrap();
    assert!(!handle.is_dirty(), "ignored file must not count");
}

#[test]
fn test_modified_tracked_file_is_dirty() {
    let (_guard, root) = workspace();
    let repo = init_repo(&root.join("repo"));
    fs::write(repo.join("README.md"), "# changed\n").unwrap();

    assert!(RepositoryHandle::open(&repo).unwrap().is_dirty());
}

#[test]
fn test_fresh_clone_is_clean_and_in_sync() {
    let (_guard, root) = workspace();
    let origin = init_repo(&root.join("origin"));
    let clone = clone_repo(&origin, &root.join("clone"));

    let handle = RepositoryHandle::open(&clone).unwrap();
    assert!(!handle.is_dirty());
    assert!(handle.remote_diff().is_empty());
    assert!(handle.has_remote());
    assert!(!handle.stashed());
}

#[test]
fn test_independent_commits_report_plus_one_minus_one() {
    let (_guard, root) = workspace();
    let (_origin, clone) = diverged_pair(&root);

    let diffs = RepositoryHandle::open(&clone).unwrap().remote_diff();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs["main"].to_string(), "+1-1");
}

#[test]
fn test_behind_only_reports_minus() {
    let (_guard, root) = workspace();
    let origin = init_repo(&root.join("origin"));
    let clone = clone_repo(&origin, &root.join("clone"));
    commit_file(&origin, "a.txt", "a\n", "First");
    commit_file(&origin, "b.txt", "b\n", "Second");
    git(&clone, &["fetch", "--quiet"]);

    let diffs = RepositoryHandle::open(&clone).unwrap().remote_diff();
    assert_eq!(diffs["main"].to_string(), "-2");
}

#[test]
fn test_deleted_tracking_reference_is_omitted() {
    let (_guard, root) = workspace();
    let (_origin, clone) = diverged_pair(&root);
    git(&clone, &["update-ref", "-d", "refs/remotes/origin/main"]);

    let handle = RepositoryHandle::open(&clone).unwrap();
    assert!(handle.remote_diff().is_empty());
    // Upstream configuration is still there
    assert!(handle.has_remote());
}

#[test]
fn test_revision_walk_matches_merge_base_counts() {
    let (_guard, root) = workspace();
    let (origin, clone) = diverged_pair(&root);
    // Shared history both walks must stop at
    for n in 0..5 {
        commit_file(&origin, &format!("shared{}.txt", n), "shared\n", "Shared work");
    }
    git(&clone, &["pull", "--quiet", "--no-rebase", "--no-edit"]);
    commit_file(&clone, "after.txt", "after\n", "After merge");
    commit_file(&origin, "late.txt", "late\n", "Late upstream");
    git(&clone, &["fetch", "--quiet"]);

    let handle = RepositoryHandle::open(&clone).unwrap();
    let branches = handle.backend().local_branches().unwrap();
    let main = branches.iter().find(|b| b.name == "main").unwrap();
    let local = main.tip.unwrap();
    let remote = main.upstream.as_ref().and_then(|u| u.live_tip()).copied().unwrap();

    let walked = handle.backend().ahead_behind(&local, &remote).unwrap();
    let generic = graph::ahead_behind(handle.backend(), &local, &remote).unwrap();
    // Local work, the merge commit and the commit after it
    assert_eq!(walked, (3, 1));
    assert_eq!(walked, generic);
    assert_eq!(handle.remote_diff()["main"].to_string(), "+3-1");
}

#[test]
fn test_unresolvable_upstream_keeps_configured_merge_ref() {
    let (_guard, root) = workspace();
    let repo = init_repo(&root.join("repo"));
    git(&repo, &["config", "branch.main.remote", "nowhere"]);
    git(&repo, &["config", "branch.main.merge", "refs/heads/trunk"]);

    let handle = RepositoryHandle::open(&repo).unwrap();
    let branches = handle.backend().local_branches().unwrap();
    let main = branches.iter().find(|b| b.name == "main").unwrap();
    match main.upstream.as_ref() {
        Some(Upstream::Stale { name }) => assert_eq!(name, "refs/heads/trunk"),
        other => panic!("expected a stale upstream, got {:?}", other),
    }
    assert!(handle.has_remote());
    assert!(handle.remote_diff().is_empty());
}

#[test]
fn test_repository_without_upstream_has_no_remote() {
    let (_guard, root) = workspace();
    let repo = init_repo(&root.join("local-only"));

    let handle = RepositoryHandle::open(&repo).unwrap();
    assert!(!handle.has_remote());
    assert!(handle.remote_diff().is_empty());
}

#[test]
fn test_stash_with_clean_tree_needs_attention() {
    let (_guard, root) = workspace();
    let repo = init_repo(&root.join("repo"));
    fs::write(repo.join("README.md"), "# work in progress\n").unwrap();
    git(&repo, &["stash", "--quiet"]);

    let record = RepositoryRecord::new(RepositoryHandle::open(&repo).unwrap());
    assert!(record.has_stash());
    assert!(!record.is_dirty());
    assert!(StatusFilter::NotOk.matches(&record));
    assert!(!StatusFilter::Ko.matches(&record));
}

#[test]
fn test_bare_repository() {
    let (_guard, root) = workspace();
    let bare = init_bare(&root.join("mirror.git"));

    let handle = RepositoryHandle::open(&bare).unwrap();
    assert!(handle.is_bare());
    assert!(handle.working_directory().is_none());
    assert!(!handle.is_dirty());
    assert_eq!(handle.canonical_path(), bare);
}

#[test]
fn test_plain_directory_is_invalid() {
    let (_guard, root) = workspace();
    let plain = root.join("plain");
    fs::create_dir_all(&plain).unwrap();

    let err = RepositoryHandle::open(&plain).err().unwrap();
    assert!(err.is_invalid_repository());
}
