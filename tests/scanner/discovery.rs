//! Discovery walk over real repositories

use crate::common::{init_bare, init_repo, workspace};
use gitmeta::repository::GixEngine;
use gitmeta::scanner::{Discovery, IgnoreList};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_discovery_finds_repositories_without_descending() {
    let (_guard, root) = workspace();
    let outer = init_repo(&root.join("projects/outer"));
    init_repo(&outer.join("vendor/inner"));
    let plain = init_repo(&root.join("plain/leaf"));
    let bare = init_bare(&root.join("mirrors/site.git"));
    fs::create_dir_all(root.join("empty/dir")).unwrap();

    let ignore = IgnoreList::new();
    let found = Discovery::new(&GixEngine, &ignore).discover(&root);

    assert_eq!(
        found.into_iter().collect::<Vec<PathBuf>>(),
        vec![bare, plain, outer]
    );
}

#[test]
fn test_discovery_prunes_literal_and_glob_entries() {
    let (_guard, root) = workspace();
    let kept = init_repo(&root.join("keep"));
    init_repo(&root.join("skip/repo"));
    init_repo(&root.join("build-1/repo"));
    init_repo(&root.join("build-2/repo"));

    let ignore_file = root.join("ignore");
    fs::write(
        &ignore_file,
        format!(
            "# scratch areas\n{}\n\n{}/build-*\n",
            root.join("skip").display(),
            root.display()
        ),
    )
    .unwrap();
    let ignore = IgnoreList::load(&ignore_file);
    assert_eq!(ignore.len(), 2);

    let found = Discovery::new(&GixEngine, &ignore).discover(&root);
    assert_eq!(found.into_iter().collect::<Vec<PathBuf>>(), vec![kept]);
}

#[test]
fn test_directory_with_stray_config_file_is_skipped() {
    let (_guard, root) = workspace();
    let settings = root.join("settings");
    fs::create_dir_all(settings.join("nested")).unwrap();
    fs::write(settings.join("config"), "not a repository\n").unwrap();
    init_repo(&settings.join("nested/repo"));

    let ignore = IgnoreList::new();
    let found = Discovery::new(&GixEngine, &ignore).discover(&root);

    // Looked like a bare repository, failed to open, not descended
    assert!(found.is_empty());
}

#[test]
fn test_discovery_reports_progress() {
    let (_guard, root) = workspace();
    init_repo(&root.join("one"));
    init_repo(&root.join("two"));

    let ignore = IgnoreList::new();
    let mut out = Vec::new();
    let found = Discovery::new(&GixEngine, &ignore).discover_reporting(&root, &mut out);

    assert_eq!(found.len(), 2);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(&format!(
        "Discovery of repositories in {} sub-directories\n",
        root.display()
    )));
    assert!(text.ends_with("2 repositories found\n"));
}
