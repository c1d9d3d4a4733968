//! Version-control engine abstraction
//!
//! Everything the status model needs from the storage engine goes through the
//! traits in this module. The production implementation lives in
//! [`super::gix_engine`]; tests substitute in-memory graphs and repositories.

use crate::repository::error::RepoResult;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

/// Read access to a commit graph: every commit knows its parents.
pub trait CommitGraph {
    type Id: Clone + Eq + Hash + Debug;

    /// Parent ids of `id`, first parent first
    fn parents(&self, id: &Self::Id) -> RepoResult<Vec<Self::Id>>;

    /// Commits only on `local` and commits only on `remote`. Engines with a
    /// native revision walk override the generic graph algorithm.
    fn ahead_behind(&self, local: &Self::Id, remote: &Self::Id) -> RepoResult<(usize, usize)>
    where
        Self: Sized,
    {
        crate::repository::graph::ahead_behind(self, local, remote)
    }
}

/// Opens repositories. Discovery and the scanner only ever see this trait.
pub trait GitEngine {
    type Repo: RepositoryBackend;

    fn open(&self, path: &Path) -> RepoResult<Self::Repo>;
}

impl<E: GitEngine + ?Sized> GitEngine for &E {
    type Repo = E::Repo;

    fn open(&self, path: &Path) -> RepoResult<Self::Repo> {
        (**self).open(path)
    }
}

/// Primitives of one opened repository
pub trait RepositoryBackend: CommitGraph {
    fn is_bare(&self) -> bool;

    /// Control directory (`.git` or the bare repository itself)
    fn git_dir(&self) -> &Path;

    /// Working directory, `None` for bare repositories
    fn workdir(&self) -> Option<&Path>;

    fn local_branches(&self) -> RepoResult<Vec<LocalBranch<Self::Id>>>;

    /// Raw working tree and index status as reported by the engine. May
    /// include ignored entries.
    fn worktree_status(&self) -> RepoResult<Vec<StatusEntry>>;

    fn has_stash(&self) -> RepoResult<bool>;
}

/// A local branch and what it tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch<Id> {
    /// Short name, e.g. `main`
    pub name: String,
    /// Peeled tip, `None` for unborn branches
    pub tip: Option<Id>,
    pub upstream: Option<Upstream<Id>>,
}

/// Upstream configuration of a local branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upstream<Id> {
    /// Tracking reference exists and peels to a commit
    Live { name: String, tip: Id },
    /// Configured, but the tracking reference no longer resolves
    Stale { name: String },
}

impl<Id> Upstream<Id> {
    pub fn name(&self) -> &str {
        match self {
            Upstream::Live { name, .. } | Upstream::Stale { name } => name,
        }
    }

    pub fn live_tip(&self) -> Option<&Id> {
        match self {
            Upstream::Live { tip, .. } => Some(tip),
            Upstream::Stale { .. } => None,
        }
    }
}

/// One entry of the working tree status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Path relative to the working directory
    pub path: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Index differs from HEAD
    Staged,
    /// Tracked file differs from the index
    Modified,
    Untracked,
    Ignored,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.kind == EntryKind::Ignored
    }
}
