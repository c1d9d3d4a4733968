//! Status filters
//!
//! Exactly one filter is active per scan. `not-ok` is the default: it keeps
//! repositories that need attention.

use crate::repository::divergence::Divergence;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// Facts a filter or the status line can ask about a repository
pub trait RepositoryFacts {
    fn is_bare(&self) -> bool;
    fn is_dirty(&self) -> bool;
    fn remote_diffs(&self) -> &BTreeMap<String, Divergence>;
    fn has_remote(&self) -> bool;
    fn has_stash(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusFilter {
    All,
    Ok,
    Ko,
    Remote,
    NoRemote,
    Unknown,
    #[default]
    NotOk,
}

impl StatusFilter {
    pub fn matches<F: RepositoryFacts + ?Sized>(&self, facts: &F) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Ok => !facts.is_dirty(),
            StatusFilter::Ko => facts.is_dirty(),
            StatusFilter::Remote => !facts.remote_diffs().is_empty(),
            StatusFilter::NoRemote => !facts.has_remote(),
            // Reserved, matches nothing
            StatusFilter::Unknown => false,
            StatusFilter::NotOk => {
                facts.is_dirty() || !facts.remote_diffs().is_empty() || facts.has_stash()
            }
        }
    }
}
