//! `gix` implementation of the engine traits

use crate::repository::engine::{
    CommitGraph, EntryKind, GitEngine, LocalBranch, RepositoryBackend, StatusEntry, Upstream,
};
use crate::repository::error::{RepoError, RepoResult};
use gix::remote::Direction;
use gix::ObjectId;
use std::path::Path;

/// Opens repositories with `gix::open`. No discovery upwards: the path must
/// be the working directory or the git directory itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct GixEngine;

impl GitEngine for GixEngine {
    type Repo = GixRepository;

    fn open(&self, path: &Path) -> RepoResult<GixRepository> {
        let repo = gix::open(path).map_err(|e| RepoError::invalid(path, e))?;
        Ok(GixRepository { repo })
    }
}

pub struct GixRepository {
    repo: gix::Repository,
}

impl GixRepository {
    pub fn open(path: &Path) -> RepoResult<Self> {
        GixEngine.open(path)
    }

    pub fn inner(&self) -> &gix::Repository {
        &self.repo
    }

    /// Commits reachable from `tip` but not from `hidden`
    fn count_excluding(&self, tip: ObjectId, hidden: ObjectId) -> RepoResult<usize> {
        let walk = self
            .repo
            .rev_walk([tip])
            .with_hidden([hidden])
            .all()
            .map_err(|e| RepoError::engine(format!("Failed to walk from {}: {}", tip, e)))?;
        let mut count = 0;
        for info in walk {
            info.map_err(|e| RepoError::engine(format!("Failed to walk from {}: {}", tip, e)))?;
            count += 1;
        }
        Ok(count)
    }

    fn upstream_of(&self, branch: &gix::refs::FullNameRef) -> Option<Upstream<ObjectId>> {
        // No `branch.<name>.merge` means nothing is tracked
        let merge = match self.repo.branch_remote_ref_name(branch, Direction::Fetch)? {
            Ok(name) => name.as_bstr().to_string(),
            Err(e) => {
                log::debug!("Unreadable upstream configuration for {}: {}", branch.as_bstr(), e);
                return Some(Upstream::Stale {
                    name: format!("branch.{}.merge", branch.shorten()),
                });
            }
        };

        let tracking = match self
            .repo
            .branch_remote_tracking_ref_name(branch, Direction::Fetch)
        {
            Some(Ok(name)) => name.as_bstr().to_string(),
            Some(Err(e)) => {
                log::debug!("No tracking reference for {}: {}", branch.as_bstr(), e);
                return Some(Upstream::Stale { name: merge });
            }
            None => return Some(Upstream::Stale { name: merge }),
        };

        match self.repo.try_find_reference(tracking.as_str()) {
            Ok(Some(mut reference)) => match reference.peel_to_id_in_place() {
                Ok(id) => Some(Upstream::Live {
                    name: tracking,
                    tip: id.detach(),
                }),
                Err(e) => {
                    log::debug!("Tracking reference {} does not peel: {}", tracking, e);
                    Some(Upstream::Stale { name: tracking })
                }
            },
            Ok(None) => {
                log::debug!("Tracking reference {} no longer exists", tracking);
                Some(Upstream::Stale { name: tracking })
            }
            Err(e) => {
                log::debug!("Failed to look up {}: {}", tracking, e);
                Some(Upstream::Stale { name: tracking })
            }
        }
    }
}

impl CommitGraph for GixRepository {
    type Id = ObjectId;

    fn parents(&self, id: &ObjectId) -> RepoResult<Vec<ObjectId>> {
        let commit = self
            .repo
            .find_commit(*id)
            .map_err(|e| RepoError::engine(format!("Failed to read commit {}: {}", id, e)))?;
        Ok(commit.parent_ids().map(|parent| parent.detach()).collect())
    }

    /// Two revision walks, each hiding the other tip, like
    /// `git rev-list --left-right --count local...remote`. The walks stop at
    /// the shared history instead of reading it back to the root.
    fn ahead_behind(&self, local: &ObjectId, remote: &ObjectId) -> RepoResult<(usize, usize)> {
        if local == remote {
            return Ok((0, 0));
        }
        let ahead = self.count_excluding(*local, *remote)?;
        let behind = self.count_excluding(*remote, *local)?;
        Ok((ahead, behind))
    }
}

impl RepositoryBackend for GixRepository {
    fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    fn git_dir(&self) -> &Path {
        self.repo.git_dir()
    }

    fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn local_branches(&self) -> RepoResult<Vec<LocalBranch<ObjectId>>> {
        let platform = self
            .repo
            .references()
            .map_err(|e| RepoError::engine(format!("Failed to read references: {}", e)))?;
        let iter = platform
            .local_branches()
            .map_err(|e| RepoError::engine(format!("Failed to list local branches: {}", e)))?;

        let mut branches = Vec::new();
        for reference in iter {
            let mut reference = reference
                .map_err(|e| RepoError::engine(format!("Failed to read branch: {}", e)))?;
            let full_name = reference.name().to_owned();
            let tip = match reference.peel_to_id_in_place() {
                Ok(id) => Some(id.detach()),
                Err(e) => {
                    log::debug!("Branch {} does not peel: {}", full_name.as_bstr(), e);
                    None
                }
            };
            branches.push(LocalBranch {
                name: full_name.as_ref().shorten().to_string(),
                tip,
                upstream: self.upstream_of(full_name.as_ref()),
            });
        }
        Ok(branches)
    }

    fn worktree_status(&self) -> RepoResult<Vec<StatusEntry>> {
        if self.repo.is_bare() {
            return Ok(Vec::new());
        }

        let platform = self
            .repo
            .status(gix::progress::Discard)
            .map_err(|e| RepoError::engine(format!("Failed to prepare status: {}", e)))?
            .untracked_files(gix::status::UntrackedFiles::Files);
        let iter = platform
            .into_iter(None)
            .map_err(|e| RepoError::engine(format!("Failed to compute status: {}", e)))?;

        let mut entries = Vec::new();
        for item in iter {
            let item =
                item.map_err(|e| RepoError::engine(format!("Failed to read status: {}", e)))?;
            let kind = match &item {
                gix::status::Item::IndexWorktree(
                    gix::status::index_worktree::Item::DirectoryContents { entry, .. },
                ) => match entry.status {
                    gix::dir::entry::Status::Ignored(_) => EntryKind::Ignored,
                    gix::dir::entry::Status::Untracked => EntryKind::Untracked,
                    _ => EntryKind::Modified,
                },
                gix::status::Item::IndexWorktree(_) => EntryKind::Modified,
                gix::status::Item::TreeIndex(_) => EntryKind::Staged,
            };
            entries.push(StatusEntry::new(item.location().to_string(), kind));
        }
        Ok(entries)
    }

    fn has_stash(&self) -> RepoResult<bool> {
        self.repo
            .try_find_reference("refs/stash")
            .map(|reference| reference.is_some())
            .map_err(|e| RepoError::engine(format!("Failed to look up stash: {}", e)))
    }
}
