//! Downstream reachability and referrer rankings

use super::common::ReachView;
use crate::graph::{ReferralGraph, UserId};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Every user transitively reachable from `user` via forward referral
/// edges, excluding `user` itself. Unknown users yield an empty set.
pub fn full_reach(graph: &ReferralGraph, user: &UserId) -> HashSet<UserId> {
    let view = ReachView::from_graph(graph);
    let Some(start) = view.index_of(user) else {
        return HashSet::new();
    };

    view.reach_from(start)
        .into_iter()
        .map(|idx| view.index_to_user[idx].clone())
        .collect()
}

/// Number of users transitively reachable from `user`
pub fn total_referral_count(graph: &ReferralGraph, user: &UserId) -> usize {
    let view = ReachView::from_graph(graph);
    match view.index_of(user) {
        Some(start) => view.reach_from(start).len(),
        None => 0,
    }
}

/// The top `k` referrers ranked by total downstream reach.
///
/// Descending by reach count, ties ascending by id. Only users that have
/// made at least one referral are eligible, so every returned count is
/// positive. Returns fewer than `k` entries when the network has fewer
/// referrers.
pub fn top_referrers(graph: &ReferralGraph, k: usize) -> Vec<(UserId, usize)> {
    if k == 0 {
        return Vec::new();
    }

    let view = ReachView::from_graph(graph);
    let mut ranked: Vec<(usize, usize)> = (0..view.node_count)
        .into_par_iter()
        .filter(|&idx| view.out_degree(idx) > 0)
        .map(|idx| (idx, view.reach_from(idx).len()))
        .collect();

    // Descending count; dense indices are in id order, so the index
    // comparison is the lexicographic tie-break.
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);

    debug!(requested = k, returned = ranked.len(), "ranked referrers by reach");

    ranked
        .into_iter()
        .map(|(idx, count)| (view.index_to_user[idx].clone(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> ReferralGraph {
        let mut graph = ReferralGraph::new();
        graph.add_referral("alice", "bob").unwrap();
        graph.add_referral("alice", "carol").unwrap();
        graph.add_referral("bob", "david").unwrap();
        graph
    }

    #[test]
    fn test_full_reach_closure() {
        let graph = sample_graph();
        let reach = full_reach(&graph, &UserId::new("alice"));

        assert_eq!(reach.len(), 3);
        assert!(reach.contains(&UserId::new("bob")));
        assert!(reach.contains(&UserId::new("carol")));
        assert!(reach.contains(&UserId::new("david")));
        assert!(!reach.contains(&UserId::new("alice")));
    }

    #[test]
    fn test_full_reach_is_union_of_direct_subtrees() {
        let graph = sample_graph();
        let alice = UserId::new("alice");

        let mut expected: HashSet<UserId> = HashSet::new();
        for direct in graph.direct_referrals(&alice) {
            expected.extend(full_reach(&graph, &direct));
            expected.insert(direct);
        }

        assert_eq!(full_reach(&graph, &alice), expected);
    }

    #[test]
    fn test_leaf_and_unknown_reach_is_empty() {
        let graph = sample_graph();
        assert!(full_reach(&graph, &UserId::new("david")).is_empty());
        assert!(full_reach(&graph, &UserId::new("ghost")).is_empty());
        assert_eq!(total_referral_count(&graph, &UserId::new("ghost")), 0);
    }

    #[test]
    fn test_total_referral_count() {
        let graph = sample_graph();
        assert_eq!(total_referral_count(&graph, &UserId::new("alice")), 3);
        assert_eq!(total_referral_count(&graph, &UserId::new("bob")), 1);
        assert_eq!(total_referral_count(&graph, &UserId::new("carol")), 0);
    }

    #[test]
    fn test_top_referrers_ordering_and_ties() {
        let mut graph = sample_graph();
        // zoe and bob both reach exactly one user; bob wins the tie by id
        graph.add_referral("zoe", "yann").unwrap();

        let ranked = top_referrers(&graph, 10);
        assert_eq!(
            ranked,
            vec![
                (UserId::new("alice"), 3),
                (UserId::new("bob"), 1),
                (UserId::new("zoe"), 1),
            ]
        );
    }

    #[test]
    fn test_top_referrers_truncation() {
        let graph = sample_graph();
        assert_eq!(top_referrers(&graph, 1), vec![(UserId::new("alice"), 3)]);
        assert!(top_referrers(&graph, 0).is_empty());
    }

    #[test]
    fn test_top_referrers_empty_graph() {
        let graph = ReferralGraph::new();
        assert!(top_referrers(&graph, 5).is_empty());
    }
}
