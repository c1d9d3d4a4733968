//! Repository Component
//!
//! One repository at a time: the engine abstraction, its `gix` implementation,
//! commit graph algorithms and the [`RepositoryHandle`] built on top of them.

pub mod divergence;
pub mod engine;
pub mod error;
pub mod gix_engine;
pub mod graph;
pub mod handle;

pub use divergence::Divergence;
pub use engine::{
    CommitGraph, EntryKind, GitEngine, LocalBranch, RepositoryBackend, StatusEntry, Upstream,
};
pub use error::{RepoError, RepoResult};
pub use gix_engine::{GixEngine, GixRepository};
pub use handle::RepositoryHandle;

#[cfg(test)]
pub(crate) mod tests;
