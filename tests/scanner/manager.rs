//! Scan loop over real repositories

use crate::common::{diverged_pair, init_repo, workspace};
use gitmeta::core::styles::StyledText;
use gitmeta::scanner::{Registry, Scanner, StatusFilter};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_pruning_keeps_valid_path_and_reports_deleted_one() {
    let (_guard, root) = workspace();
    let valid = init_repo(&root.join("valid"));
    let deleted = init_repo(&root.join("deleted"));
    fs::remove_dir_all(&deleted).unwrap();

    let file = root.join("repolist");
    let mut registry = Registry::load(&file).unwrap();
    registry
        .replace(vec![valid.clone(), deleted.clone()])
        .unwrap();

    let mut diagnostics = Vec::new();
    let records: Vec<PathBuf> = Scanner::new(&mut registry)
        .iter_with_diagnostics(StatusFilter::All, true, &mut diagnostics)
        .map(|record| record.path().to_path_buf())
        .collect();

    assert_eq!(records, vec![valid.clone()]);
    assert_eq!(
        String::from_utf8(diagnostics).unwrap(),
        format!("{}\n    is not a valid repository\n", deleted.display())
    );
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        format!("{}\n", valid.display())
    );
}

#[test]
fn test_default_filter_skips_clean_repositories() {
    let (_guard, root) = workspace();
    let clean = init_repo(&root.join("clean"));
    let (origin, clone) = diverged_pair(&root);

    let mut registry = Registry::load(root.join("repolist")).unwrap();
    registry
        .replace(vec![clean, origin, clone.clone()])
        .unwrap();

    let records: Vec<PathBuf> = Scanner::new(&mut registry)
        .iter_with_diagnostics(StatusFilter::default(), false, Vec::new())
        .map(|record| record.path().to_path_buf())
        .collect();

    assert_eq!(records, vec![clone]);
}

fn first_line(registry: &mut Registry, width: usize) -> StyledText {
    Scanner::new(registry)
        .iter_with_diagnostics(StatusFilter::All, false, Vec::new())
        .next()
        .expect("one repository")
        .status_line(width)
}

#[test]
fn test_status_line_width_for_short_and_long_paths() {
    let (_guard, root) = workspace();
    let (_origin, clone) = diverged_pair(&root);
    let deep = init_repo(&root.join("a-rather-long-directory-name/that-keeps/going-and-going/repo"));

    let mut registry = Registry::load(root.join("short")).unwrap();
    registry.replace(vec![clone.clone()]).unwrap();
    let line = first_line(&mut registry, 100);
    assert_eq!(line.width(), 100);
    assert!(line.plain().ends_with(" (main:+1-1) [ OK ]"));

    let mut registry = Registry::load(root.join("long")).unwrap();
    registry.replace(vec![deep]).unwrap();
    let line = first_line(&mut registry, 60);
    assert_eq!(line.width(), 60);
    assert!(line.plain().starts_with(" ..."));
    assert!(line.plain().contains("/going-and-going/repo "));
}
