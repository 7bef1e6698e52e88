//! Influencer selection metrics
//!
//! Two complementary rankings: greedy maximum-coverage selection
//! (largest combined unique audience) and shortest-path flow
//! centrality (who sits on the most referral chains).

use super::common::ReachView;
use crate::graph::{ReferralGraph, UserId};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Greedy maximum-coverage selection of up to `k` referrers.
///
/// Each round picks the referrer whose reach adds the most users not
/// covered by earlier picks, ties broken by ascending id, and reports
/// that marginal gain. Stops early once the best remaining gain is 0.
/// The exact problem is NP-hard; the greedy pick carries the classic
/// (1 - 1/e) approximation bound.
pub fn unique_reach_expansion(graph: &ReferralGraph, k: usize) -> Vec<(UserId, usize)> {
    if k == 0 {
        return Vec::new();
    }

    let view = ReachView::from_graph(graph);
    // Candidates in ascending id order; the scan below keeps the first
    // best, which resolves ties toward the smaller id.
    let candidates: Vec<usize> = (0..view.node_count)
        .filter(|&idx| view.out_degree(idx) > 0)
        .collect();
    let reach_sets: Vec<FxHashSet<usize>> = candidates
        .par_iter()
        .map(|&idx| view.reach_from(idx))
        .collect();

    let mut covered: FxHashSet<usize> = FxHashSet::default();
    let mut selected = vec![false; candidates.len()];
    let mut result = Vec::new();

    for _ in 0..k {
        let mut best: Option<(usize, usize)> = None;
        for (slot, reach) in reach_sets.iter().enumerate() {
            if selected[slot] {
                continue;
            }
            let gain = reach.iter().filter(|idx| !covered.contains(*idx)).count();
            if best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((slot, gain));
            }
        }

        let Some((slot, gain)) = best else {
            break;
        };
        if gain == 0 {
            break;
        }

        selected[slot] = true;
        covered.extend(reach_sets[slot].iter().copied());
        result.push((view.index_to_user[candidates[slot]].clone(), gain));
    }

    debug!(
        requested = k,
        selected = result.len(),
        covered = covered.len(),
        "greedy coverage selection finished"
    );
    result
}

/// Shortest-path flow centrality for every user.
///
/// A user's score counts the ordered reachable pairs (s, t) whose
/// shortest path it sits on, i.e. dist(s,v) + dist(v,t) == dist(s,t).
/// In a referral forest each reachable pair has a unique path, but the
/// general distance test is kept so the metric stays correct if the
/// unique-parent constraint is ever relaxed. Output covers every user,
/// zero scores included, descending by score with ties ascending by id.
pub fn flow_centrality(graph: &ReferralGraph) -> Vec<(UserId, u64)> {
    let view = ReachView::from_graph(graph);
    let n = view.node_count;

    // All-pairs forward BFS; sources are independent, so run in parallel
    // against the immutable snapshot.
    let dist: Vec<FxHashMap<usize, u32>> = (0..n)
        .into_par_iter()
        .map(|source| view.distances_from(source))
        .collect();

    let mut scores = vec![0u64; n];
    for s in 0..n {
        for (&v, &d_sv) in &dist[s] {
            if v == s {
                continue;
            }
            for (&t, &d_vt) in &dist[v] {
                if t == v || t == s {
                    continue;
                }
                if let Some(&d_st) = dist[s].get(&t) {
                    if d_sv + d_vt == d_st {
                        scores[v] += 1;
                    }
                }
            }
        }
    }

    let mut ranked: Vec<(usize, u64)> = scores.into_iter().enumerate().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .map(|(idx, score)| (view.index_to_user[idx].clone(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_reach_expansion_greedy_order() {
        let mut graph = ReferralGraph::new();
        graph.add_referral("alice", "bob").unwrap();
        graph.add_referral("alice", "carol").unwrap();
        graph.add_referral("bob", "david").unwrap();
        graph.add_referral("eve", "frank").unwrap();

        // alice covers {bob, carol, david}; bob adds nothing after
        // alice; eve adds {frank}
        let picks = unique_reach_expansion(&graph, 3);
        assert_eq!(
            picks,
            vec![(UserId::new("alice"), 3), (UserId::new("eve"), 1)]
        );
    }

    #[test]
    fn test_unique_reach_expansion_tie_break() {
        let mut graph = ReferralGraph::new();
        graph.add_referral("zoe", "yann").unwrap();
        graph.add_referral("amy", "ben").unwrap();

        // Equal gains; amy wins by id, zoe still contributes after
        let picks = unique_reach_expansion(&graph, 2);
        assert_eq!(picks, vec![(UserId::new("amy"), 1), (UserId::new("zoe"), 1)]);
    }

    #[test]
    fn test_unique_reach_expansion_cumulative_coverage_bounded() {
        let mut graph = ReferralGraph::new();
        graph.add_referral("a", "b").unwrap();
        graph.add_referral("b", "c").unwrap();
        graph.add_referral("d", "e").unwrap();

        let picks = unique_reach_expansion(&graph, 10);
        let covered: usize = picks.iter().map(|(_, gain)| gain).sum();
        assert!(covered <= graph.user_count());
        assert_eq!(covered, 3); // b, c, e
    }

    #[test]
    fn test_unique_reach_expansion_empty_cases() {
        let graph = ReferralGraph::new();
        assert!(unique_reach_expansion(&graph, 5).is_empty());

        let mut graph = ReferralGraph::new();
        graph.add_referral("a", "b").unwrap();
        assert!(unique_reach_expansion(&graph, 0).is_empty());
    }

    #[test]
    fn test_flow_centrality_chain() {
        // a -> b -> c -> d: b and c are waypoints on 2 pairs each,
        // endpoints on none
        let mut graph = ReferralGraph::new();
        graph.add_referral("a", "b").unwrap();
        graph.add_referral("b", "c").unwrap();
        graph.add_referral("c", "d").unwrap();

        let scores = flow_centrality(&graph);
        assert_eq!(
            scores,
            vec![
                (UserId::new("b"), 2),
                (UserId::new("c"), 2),
                (UserId::new("a"), 0),
                (UserId::new("d"), 0),
            ]
        );
    }

    #[test]
    fn test_flow_centrality_star_has_no_waypoints() {
        // Every reachable pair is a direct edge
        let mut graph = ReferralGraph::new();
        graph.add_referral("hub", "a").unwrap();
        graph.add_referral("hub", "b").unwrap();
        graph.add_referral("hub", "c").unwrap();

        let scores = flow_centrality(&graph);
        assert!(scores.iter().all(|(_, score)| *score == 0));
        assert_eq!(scores.len(), 4);
        // All-zero ranking falls back to pure id order
        assert_eq!(scores[0].0, UserId::new("a"));
    }

    #[test]
    fn test_flow_centrality_empty_graph() {
        let graph = ReferralGraph::new();
        assert!(flow_centrality(&graph).is_empty());
    }
}
