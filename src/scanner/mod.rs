//! Scanner Component
//!
//! Everything that deals with many repositories at once: the discovery walk
//! and its ignore list, the persisted registry, status filters, status line
//! rendering and the scan loop.

pub mod discovery;
pub mod error;
pub mod filter;
pub mod ignore;
pub mod manager;
pub mod registry;
pub mod statusline;

pub use discovery::Discovery;
pub use error::{RegistryError, RegistryResult};
pub use filter::{RepositoryFacts, StatusFilter};
pub use ignore::{IgnoreEntry, IgnoreList};
pub use manager::{RepositoryRecord, ScanIter, Scanner};
pub use registry::Registry;
