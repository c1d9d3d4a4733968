//! gitmeta: status of every git repository under a directory tree.
//!
//! The crate is split into four layers:
//!
//! - [`repository`]: one repository at a time. Engine abstraction over `gix`,
//!   commit graph algorithms and the [`repository::RepositoryHandle`].
//! - [`scanner`]: many repositories. Discovery walk, ignore list, persisted
//!   registry, status filters, status line rendering and the scan loop.
//! - [`core`]: shared infrastructure (configuration, logging, styles,
//!   terminal integration, error reporting, build metadata).
//! - [`app`]: command line surface and startup sequence.

pub mod app;
pub mod core;
pub mod repository;
pub mod scanner;
