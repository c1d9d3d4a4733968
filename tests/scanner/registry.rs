//! Registry persistence

use crate::common::{init_repo, workspace};
use gitmeta::repository::GixEngine;
use gitmeta::scanner::{Discovery, IgnoreList, Registry, RegistryError};
use std::fs;

#[test]
fn test_discovery_result_round_trips_byte_identical() {
    let (_guard, root) = workspace();
    init_repo(&root.join("src/b"));
    init_repo(&root.join("src/a"));
    let file = root.join("cache/gitmeta/repolist");

    let ignore = IgnoreList::new();
    let found = Discovery::new(&GixEngine, &ignore).discover(&root.join("src"));
    let mut registry = Registry::load(&file).unwrap();
    registry.replace(found).unwrap();
    let saved = fs::read(&file).unwrap();

    let expected = format!(
        "{}\n{}\n",
        root.join("src/a").display(),
        root.join("src/b").display()
    );
    assert_eq!(String::from_utf8(saved.clone()).unwrap(), expected);

    Registry::load(&file).unwrap().persist().unwrap();
    assert_eq!(fs::read(&file).unwrap(), saved);
}

#[test]
fn test_unwritable_registry_location_is_an_error() {
    let (_guard, root) = workspace();
    let mut registry = Registry::load(root.join("blocker/repolist")).unwrap();
    assert!(registry.is_empty());
    // A file appears where the parent directory should be created
    fs::write(root.join("blocker"), "").unwrap();

    let err = registry.replace(vec![root.join("x")]).unwrap_err();
    assert!(matches!(err, RegistryError::Write { .. }), "{:?}", err);
    assert_eq!(err.path(), root.join("blocker/repolist"));
}
