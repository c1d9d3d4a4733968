//! Repository registry
//!
//! The sorted, deduplicated set of known repository paths, persisted as one
//! path per line. Every mutation is written through to the file at once.

use crate::scanner::error::{RegistryError, RegistryResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Registry {
    file: PathBuf,
    paths: BTreeSet<PathBuf>,
}

impl Registry {
    /// Load `file`. A missing file gives an empty registry.
    pub fn load(file: impl Into<PathBuf>) -> RegistryResult<Self> {
        let mut registry = Self {
            file: file.into(),
            paths: BTreeSet::new(),
        };
        registry.reload()?;
        Ok(registry)
    }

    /// Replace the in-memory snapshot with the file content
    pub fn reload(&mut self) -> RegistryResult<()> {
        self.paths = match std::fs::read_to_string(&self.file) {
            Ok(content) => parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(source) => {
                return Err(RegistryError::Read {
                    path: self.file.clone(),
                    source,
                })
            }
        };
        log::debug!(
            "Registry {} holds {} repositories",
            self.file.display(),
            self.paths.len()
        );
        Ok(())
    }

    /// Write the snapshot, creating missing parent directories
    pub fn persist(&self) -> RegistryResult<()> {
        let write_error = |source| RegistryError::Write {
            path: self.file.clone(),
            source,
        };
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&self.file, serialize(&self.paths)).map_err(write_error)
    }

    /// Replace the whole content, as after a discovery run
    pub fn replace<I>(&mut self, paths: I) -> RegistryResult<()>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.paths = paths.into_iter().collect();
        self.persist()
    }

    /// Remove one entry. Returns false if it was not registered.
    pub fn remove(&mut self, path: &Path) -> RegistryResult<bool> {
        if !self.paths.remove(path) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn file_exists(&self) -> bool {
        self.file.is_file()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn parse(content: &str) -> BTreeSet<PathBuf> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn serialize(paths: &BTreeSet<PathBuf>) -> String {
    let mut content = String::new();
    for path in paths {
        content.push_str(&path.to_string_lossy());
        content.push('\n');
    }
    content
}
