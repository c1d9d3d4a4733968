//! Ignore list for the discovery walk
//!
//! One entry per line. Entries with glob metacharacters are compiled as
//! patterns and matched against the full directory path; any other entry is
//! a literal directory path.

use crate::core::config::expand_home;
use std::path::{Path, PathBuf};

const GLOB_METACHARACTERS: [char; 3] = ['*', '?', '['];

#[derive(Debug, Clone)]
pub enum IgnoreEntry {
    Literal(PathBuf),
    Pattern(glob::Pattern),
}

impl IgnoreEntry {
    /// Parse one entry. Invalid patterns fall back to literals.
    pub fn parse(entry: &str) -> Self {
        let expanded = expand_home(entry);
        let text = expanded.to_string_lossy();
        if !text.contains(GLOB_METACHARACTERS) {
            return IgnoreEntry::Literal(expanded);
        }
        match glob::Pattern::new(&text) {
            Ok(pattern) => IgnoreEntry::Pattern(pattern),
            Err(e) => {
                log::warn!("Invalid ignore pattern '{}' ({}), using it literally", entry, e);
                IgnoreEntry::Literal(expanded)
            }
        }
    }

    pub fn matches(&self, dir: &Path) -> bool {
        match self {
            IgnoreEntry::Literal(path) => path == dir,
            IgnoreEntry::Pattern(pattern) => pattern.matches_path(dir),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file content, skipping blank lines and `#` comments
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(IgnoreEntry::parse)
            .collect();
        Self { entries }
    }

    /// Load the ignore file. A missing or unreadable file means no ignores.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let list = Self::parse(&content);
                log::debug!(
                    "Loaded {} ignore entries from {}",
                    list.len(),
                    path.display()
                );
                list
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No ignore file at {}", path.display());
                Self::new()
            }
            Err(e) => {
                log::warn!("Cannot read ignore file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn push(&mut self, entry: &str) -> &mut Self {
        self.entries.push(IgnoreEntry::parse(entry));
        self
    }

    pub fn entries(&self) -> &[IgnoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_ignored(&self, dir: &Path) -> bool {
        self.entries.iter().any(|entry| entry.matches(dir))
    }
}
