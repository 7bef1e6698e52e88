//! Shared utilities for referral analytics
//!
//! Provides a read-only, densely indexed snapshot of the referral forest
//! for algorithm execution. All traversals use explicit queues so that
//! memory, not call-stack depth, is the only bound at 10k+ user scale.

use crate::graph::{ReferralGraph, UserId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// A dense, integer-indexed view of the referral topology.
///
/// `index_to_user` is sorted ascending, so dense-index order is
/// lexicographic id order and ranking tie-breaks reduce to index
/// comparisons.
pub struct ReachView {
    /// Number of users in the snapshot
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to UserId
    pub index_to_user: Vec<UserId>,
    /// Mapping from UserId to dense index
    pub user_to_index: FxHashMap<UserId, usize>,
    /// Forward adjacency: dense index -> direct referral indices
    pub outgoing: Vec<Vec<usize>>,
}

impl ReachView {
    /// Build a snapshot of the graph for algorithm execution
    pub fn from_graph(graph: &ReferralGraph) -> Self {
        let mut ids: FxHashSet<UserId> = FxHashSet::default();
        for (referrer, candidates) in graph.adjacency() {
            ids.insert(referrer.clone());
            for candidate in candidates {
                ids.insert(candidate.clone());
            }
        }

        let mut index_to_user: Vec<UserId> = ids.into_iter().collect();
        index_to_user.sort_unstable();

        let node_count = index_to_user.len();
        let mut user_to_index = FxHashMap::default();
        user_to_index.reserve(node_count);
        for (idx, user) in index_to_user.iter().enumerate() {
            user_to_index.insert(user.clone(), idx);
        }

        let mut outgoing = vec![Vec::new(); node_count];
        for (referrer, candidates) in graph.adjacency() {
            let u_idx = user_to_index[referrer];
            for candidate in candidates {
                outgoing[u_idx].push(user_to_index[candidate]);
            }
        }

        ReachView {
            node_count,
            index_to_user,
            user_to_index,
            outgoing,
        }
    }

    /// Dense index of a user, if present in the snapshot
    pub fn index_of(&self, user: &UserId) -> Option<usize> {
        self.user_to_index.get(user).copied()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    /// Every node transitively reachable from `start`, excluding `start`.
    ///
    /// Breadth-first with an explicit queue; each node is enqueued once.
    pub fn reach_from(&self, start: usize) -> FxHashSet<usize> {
        let mut visited: FxHashSet<usize> = FxHashSet::default();
        let mut queue = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in &self.outgoing[current] {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited.remove(&start);
        visited
    }

    /// Shortest-path distances (edge counts) from `source` to every
    /// reachable node, the source itself included at distance 0.
    /// Unreachable nodes have no entry.
    pub fn distances_from(&self, source: usize) -> FxHashMap<usize, u32> {
        let mut dist: FxHashMap<usize, u32> = FxHashMap::default();
        let mut queue = VecDeque::new();

        dist.insert(source, 0);
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let d = dist[&current];
            for &next in &self.outgoing[current] {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }

        dist
    }
}
