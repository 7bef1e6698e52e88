//! Referral analytics module
//!
//! Pure read-side computations over the referral graph. Every entry
//! point builds a fresh dense snapshot (`ReachView`) of the graph, so
//! there is no cached state to invalidate on mutation.

pub mod common;
pub mod influence;
pub mod reach;

pub use common::ReachView;
pub use influence::{flow_centrality, unique_reach_expansion};
pub use reach::{full_reach, top_referrers, total_referral_count};
