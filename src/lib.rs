//! Referral Network Analytics
//!
//! Models a directed referral network as an append-only forest (every
//! candidate has at most one referrer, no cycles) and computes
//! influence analytics over it:
//!
//! - **graph**: validated referral storage ([`ReferralGraph`])
//! - **algo**: downstream reach, referrer rankings, greedy
//!   maximum-coverage selection, and shortest-path flow centrality
//! - **growth** (re-exported from the `referralnet-growth` crate):
//!   deterministic expected-value growth simulation with binary-search
//!   day and bonus optimizers
//!
//! Mutation is single-writer and synchronous; analytics are pure reads
//! over an immutable snapshot and may run in parallel internally.

pub mod algo;
pub mod graph;

pub use algo::{
    flow_centrality, full_reach, top_referrers, total_referral_count, unique_reach_expansion,
    ReachView,
};
pub use graph::{ReferralError, ReferralGraph, ReferralResult, UserId};

// Growth planning re-exports
pub use referralnet_growth::{BonusOptimizer, BonusSearchConfig, GrowthSimulator, SimulationConfig};
