//! Commit graph algorithms
//!
//! Merge base and ahead/behind counting over any [`CommitGraph`]. Walks are
//! breadth-first with a visited set, so merges are only counted once and the
//! cost is bounded by the size of the history.

use crate::repository::engine::CommitGraph;
use crate::repository::error::RepoResult;
use std::collections::{HashSet, VecDeque};

/// Every commit reachable from `start`, `start` included
pub fn ancestors<G: CommitGraph>(graph: &G, start: &G::Id) -> RepoResult<HashSet<G::Id>> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([start.clone()]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        for parent in graph.parents(&id)? {
            if !seen.contains(&parent) {
                queue.push_back(parent);
            }
        }
    }
    Ok(seen)
}

/// Number of commits reachable from `tip` that are not in `excluded`.
///
/// The walk stops at excluded commits, so counting `tip` against the
/// ancestors of a merge base only touches the commits in between.
pub fn count_reachable_excluding<G: CommitGraph>(
    graph: &G,
    tip: &G::Id,
    excluded: &HashSet<G::Id>,
) -> RepoResult<usize> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([tip.clone()]);
    while let Some(id) = queue.pop_front() {
        if excluded.contains(&id) || !seen.insert(id.clone()) {
            continue;
        }
        for parent in graph.parents(&id)? {
            if !seen.contains(&parent) && !excluded.contains(&parent) {
                queue.push_back(parent);
            }
        }
    }
    Ok(seen.len())
}

/// Best common ancestor of `a` and `b`.
///
/// Common ancestors that are themselves ancestors of another common ancestor
/// are discarded. When several best candidates remain (criss-cross merges) the
/// one closest to `b` in breadth-first order is returned. `None` means the
/// histories are unrelated.
pub fn merge_base<G: CommitGraph>(graph: &G, a: &G::Id, b: &G::Id) -> RepoResult<Option<G::Id>> {
    if a == b {
        return Ok(Some(a.clone()));
    }

    let from_a = ancestors(graph, a)?;

    // Frontier of common ancestors seen from `b`: stop descending at the first
    // commit shared with `a` on every path.
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([b.clone()]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if from_a.contains(&id) {
            candidates.push(id);
            continue;
        }
        for parent in graph.parents(&id)? {
            if !seen.contains(&parent) {
                queue.push_back(parent);
            }
        }
    }

    if candidates.len() <= 1 {
        return Ok(candidates.pop());
    }

    // Drop candidates reachable from another candidate
    let mut redundant = HashSet::new();
    for candidate in &candidates {
        if redundant.contains(candidate) {
            continue;
        }
        for parent in graph.parents(candidate)? {
            for ancestor in ancestors(graph, &parent)? {
                redundant.insert(ancestor);
            }
        }
    }
    Ok(candidates
        .into_iter()
        .find(|candidate| !redundant.contains(candidate)))
}

/// Commits only on `local` and commits only on `remote` since their merge
/// base, tips inclusive and base exclusive.
pub fn ahead_behind<G: CommitGraph>(
    graph: &G,
    local: &G::Id,
    remote: &G::Id,
) -> RepoResult<(usize, usize)> {
    if local == remote {
        return Ok((0, 0));
    }

    match merge_base(graph, local, remote)? {
        Some(base) => {
            let boundary = ancestors(graph, &base)?;
            let ahead = count_reachable_excluding(graph, local, &boundary)?;
            let behind = count_reachable_excluding(graph, remote, &boundary)?;
            Ok((ahead, behind))
        }
        None => {
            // Unrelated histories share nothing: each side counts in full
            let ahead = ancestors(graph, local)?.len();
            let behind = ancestors(graph, remote)?.len();
            Ok((ahead, behind))
        }
    }
}
