//! Repository handle
//!
//! Wraps one opened repository and answers the questions the status report
//! asks: is it dirty, how far is each branch from its upstream, does it have a
//! remote at all, is anything stashed.

use crate::repository::divergence::Divergence;
use crate::repository::engine::{CommitGraph, GitEngine, RepositoryBackend, StatusEntry};
use crate::repository::error::RepoResult;
use crate::repository::gix_engine::{GixEngine, GixRepository};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct RepositoryHandle<R = GixRepository> {
    backend: R,
}

impl RepositoryHandle<GixRepository> {
    /// Open `path` with the `gix` engine
    pub fn open(path: &Path) -> RepoResult<Self> {
        Self::open_with(&GixEngine, path)
    }
}

impl<R: RepositoryBackend> RepositoryHandle<R> {
    pub fn open_with<E>(engine: &E, path: &Path) -> RepoResult<Self>
    where
        E: GitEngine<Repo = R>,
    {
        Ok(Self::from_backend(engine.open(path)?))
    }

    pub fn from_backend(backend: R) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn is_bare(&self) -> bool {
        self.backend.is_bare()
    }

    /// Working directory, or the git directory for bare repositories
    pub fn path(&self) -> &Path {
        self.backend
            .workdir()
            .unwrap_or_else(|| self.backend.git_dir())
    }

    pub fn git_dir(&self) -> &Path {
        self.backend.git_dir()
    }

    pub fn working_directory(&self) -> Option<&Path> {
        if self.backend.is_bare() {
            None
        } else {
            self.backend.workdir()
        }
    }

    /// Canonical form of [`Self::path`], as stored in the registry
    pub fn canonical_path(&self) -> PathBuf {
        let path = self.path();
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Non-clean entries with ignored files filtered out
    pub fn status(&self) -> RepoResult<Vec<StatusEntry>> {
        let mut entries = self.backend.worktree_status()?;
        entries.retain(|entry| !entry.is_ignored());
        Ok(entries)
    }

    /// Tracked changes or untracked files. Ignored files never count.
    pub fn is_dirty(&self) -> bool {
        if self.backend.is_bare() {
            return false;
        }
        match self.status() {
            Ok(entries) => !entries.is_empty(),
            Err(e) => {
                log::warn!("Cannot read status of {}: {}", self.path().display(), e);
                false
            }
        }
    }

    /// Divergence of every local branch with a live upstream. Branches in
    /// sync, without upstream or with a stale upstream are left out.
    pub fn try_remote_diff(&self) -> RepoResult<BTreeMap<String, Divergence>> {
        let mut diffs = BTreeMap::new();
        for branch in self.backend.local_branches()? {
            let Some(upstream) = branch.upstream.as_ref() else {
                continue;
            };
            let Some(remote_tip) = upstream.live_tip() else {
                log::debug!(
                    "{}: upstream {} of {} is gone",
                    self.path().display(),
                    upstream.name(),
                    branch.name
                );
                continue;
            };
            let Some(local_tip) = branch.tip.as_ref() else {
                continue;
            };

            let (ahead, behind) = self.backend.ahead_behind(local_tip, remote_tip)?;
            let divergence = Divergence::new(ahead, behind);
            if !divergence.is_in_sync() {
                diffs.insert(branch.name, divergence);
            }
        }
        Ok(diffs)
    }

    pub fn remote_diff(&self) -> BTreeMap<String, Divergence> {
        self.try_remote_diff().unwrap_or_else(|e| {
            log::warn!(
                "Cannot compare {} with its remotes: {}",
                self.path().display(),
                e
            );
            BTreeMap::new()
        })
    }

    /// True if any local branch has upstream configuration, live or not
    pub fn has_remote(&self) -> bool {
        match self.backend.local_branches() {
            Ok(branches) => branches.iter().any(|branch| branch.upstream.is_some()),
            Err(e) => {
                log::warn!("Cannot list branches of {}: {}", self.path().display(), e);
                false
            }
        }
    }

    pub fn stashed(&self) -> bool {
        self.backend.has_stash().unwrap_or_else(|e| {
            log::warn!("Cannot read stash of {}: {}", self.path().display(), e);
            false
        })
    }
}
