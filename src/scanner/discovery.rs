//! Discovery walk
//!
//! Depth-first walk from a scan root that records every repository root it
//! meets. Ignored directories are pruned before any repository check, found
//! repositories are never descended into, and symbolic links are not
//! followed.

use crate::repository::engine::GitEngine;
use crate::repository::handle::RepositoryHandle;
use crate::scanner::ignore::IgnoreList;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Discovery<'a, E: GitEngine> {
    engine: &'a E,
    ignore: &'a IgnoreList,
}

impl<'a, E: GitEngine> Discovery<'a, E> {
    pub fn new(engine: &'a E, ignore: &'a IgnoreList) -> Self {
        Self { engine, ignore }
    }

    /// Canonical paths of every repository under `scan_root`
    pub fn discover(&self, scan_root: &Path) -> BTreeSet<PathBuf> {
        let mut found = BTreeSet::new();
        let root = match std::fs::canonicalize(scan_root) {
            Ok(root) if root.is_dir() => root,
            Ok(_) | Err(_) => {
                log::warn!(
                    "Scan root {} does not exist or is not a directory",
                    scan_root.display()
                );
                return found;
            }
        };

        let mut pending = vec![root];
        while let Some(dir) = pending.pop() {
            if self.ignore.is_ignored(&dir) {
                log::debug!("Ignoring {}", dir.display());
                continue;
            }
            if looks_like_repository(&dir) {
                match RepositoryHandle::open_with(self.engine, &dir) {
                    Ok(handle) => {
                        let path = handle.canonical_path();
                        log::debug!("Found repository {}", path.display());
                        found.insert(path);
                    }
                    Err(e) => log::debug!("Skipping {}: {}", dir.display(), e),
                }
                continue;
            }
            let mut children = subdirectories(&dir);
            // Reverse so the stack pops siblings in name order
            children.reverse();
            pending.extend(children);
        }
        found
    }

    /// [`Self::discover`] with progress messages written to `out`
    pub fn discover_reporting<W: Write>(
        &self,
        scan_root: &Path,
        out: &mut W,
    ) -> BTreeSet<PathBuf> {
        if let Err(e) = writeln!(
            out,
            "Discovery of repositories in {} sub-directories",
            scan_root.display()
        ) {
            log::debug!("Cannot write progress: {}", e);
        }
        let found = self.discover(scan_root);
        if let Err(e) = writeln!(out, "{} repositories found", found.len()) {
            log::debug!("Cannot write progress: {}", e);
        }
        found
    }
}

/// A `.git` entry (directory or gitfile), or a `config` file for bare
/// repositories
fn looks_like_repository(dir: &Path) -> bool {
    dir.join(".git").exists() || dir.join("config").is_file()
}

/// Sorted real subdirectories. Symbolic links and unreadable entries are
/// skipped.
fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };
    let mut children: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();
    children.sort();
    children
}
