//! Scanner Manager
//!
//! Walks the registry in order, opens every repository and yields the ones
//! matching a [`StatusFilter`]. Paths that no longer open are reported on the
//! diagnostics stream and, when pruning, removed from the registry at once.
//!
//! Facts are computed lazily and at most once per record, so a filter that
//! only needs dirtiness never walks the commit graph.

use crate::core::styles::StyledText;
use crate::repository::divergence::Divergence;
use crate::repository::engine::{GitEngine, RepositoryBackend};
use crate::repository::gix_engine::{GixEngine, GixRepository};
use crate::repository::handle::RepositoryHandle;
use crate::scanner::filter::{RepositoryFacts, StatusFilter};
use crate::scanner::registry::Registry;
use crate::scanner::statusline;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One repository seen during a scan
pub struct RepositoryRecord<R = GixRepository> {
    handle: RepositoryHandle<R>,
    dirty: OnceCell<bool>,
    remote_diffs: OnceCell<BTreeMap<String, Divergence>>,
    remote: OnceCell<bool>,
    stash: OnceCell<bool>,
}

impl<R: RepositoryBackend> RepositoryRecord<R> {
    pub fn new(handle: RepositoryHandle<R>) -> Self {
        Self {
            handle,
            dirty: OnceCell::new(),
            remote_diffs: OnceCell::new(),
            remote: OnceCell::new(),
            stash: OnceCell::new(),
        }
    }

    /// Working directory, or the git directory for bare repositories
    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.handle.working_directory()
    }

    pub fn handle(&self) -> &RepositoryHandle<R> {
        &self.handle
    }

    pub fn status_line(&self, line_width: usize) -> StyledText {
        statusline::render(self.path(), self, line_width)
    }
}

impl<R: RepositoryBackend> RepositoryFacts for RepositoryRecord<R> {
    fn is_bare(&self) -> bool {
        self.handle.is_bare()
    }

    fn is_dirty(&self) -> bool {
        *self.dirty.get_or_init(|| self.handle.is_dirty())
    }

    fn remote_diffs(&self) -> &BTreeMap<String, Divergence> {
        self.remote_diffs.get_or_init(|| self.handle.remote_diff())
    }

    fn has_remote(&self) -> bool {
        *self.remote.get_or_init(|| self.handle.has_remote())
    }

    fn has_stash(&self) -> bool {
        *self.stash.get_or_init(|| self.handle.stashed())
    }
}

pub struct Scanner<'r, E: GitEngine = GixEngine> {
    registry: &'r mut Registry,
    engine: E,
}

impl<'r> Scanner<'r, GixEngine> {
    pub fn new(registry: &'r mut Registry) -> Self {
        Self::with_engine(registry, GixEngine)
    }
}

impl<'r, E: GitEngine> Scanner<'r, E> {
    pub fn with_engine(registry: &'r mut Registry, engine: E) -> Self {
        Self { registry, engine }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Scan with diagnostics on stderr
    pub fn iter(
        &mut self,
        filter: StatusFilter,
        prune_invalid: bool,
    ) -> ScanIter<'_, E, std::io::Stderr> {
        self.iter_with_diagnostics(filter, prune_invalid, std::io::stderr())
    }

    pub fn iter_with_diagnostics<W: Write>(
        &mut self,
        filter: StatusFilter,
        prune_invalid: bool,
        diagnostics: W,
    ) -> ScanIter<'_, E, W> {
        // Snapshot: pruning must not disturb the iteration order
        let pending: Vec<PathBuf> = self.registry.paths().map(Path::to_path_buf).collect();
        log::debug!(
            "Scanning {} repositories with filter {}",
            pending.len(),
            filter
        );
        ScanIter {
            registry: &mut *self.registry,
            engine: &self.engine,
            pending: pending.into_iter(),
            filter,
            prune_invalid,
            diagnostics,
            invalid: Vec::new(),
        }
    }
}

/// Lazy scan over a registry snapshot
pub struct ScanIter<'s, E: GitEngine, W: Write> {
    registry: &'s mut Registry,
    engine: &'s E,
    pending: std::vec::IntoIter<PathBuf>,
    filter: StatusFilter,
    prune_invalid: bool,
    diagnostics: W,
    invalid: Vec<PathBuf>,
}

impl<E: GitEngine, W: Write> ScanIter<'_, E, W> {
    /// Paths that failed to open so far
    pub fn invalid(&self) -> &[PathBuf] {
        &self.invalid
    }

    fn report_invalid(&mut self, path: PathBuf) {
        if let Err(e) = writeln!(
            self.diagnostics,
            "{}\n    is not a valid repository",
            path.display()
        ) {
            log::debug!("Cannot write diagnostic: {}", e);
        }

        if self.prune_invalid {
            match self.registry.remove(&path) {
                Ok(_) => log::info!("Removed {} from the registry", path.display()),
                Err(e) => log::error!("{}", e),
            }
        } else {
            log::info!(
                "Run with --clean to remove {} from the registry",
                path.display()
            );
        }
        self.invalid.push(path);
    }
}

impl<E: GitEngine, W: Write> Iterator for ScanIter<'_, E, W> {
    type Item = RepositoryRecord<E::Repo>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.pending.next() {
            let handle = match RepositoryHandle::open_with(self.engine, &path) {
                Ok(handle) => handle,
                Err(e) => {
                    log::debug!("{}", e);
                    self.report_invalid(path);
                    continue;
                }
            };
            let record = RepositoryRecord::new(handle);
            if self.filter.matches(&record) {
                return Some(record);
            }
        }
        None
    }
}
