//! In-memory referral graph storage
//!
//! Stores the directed referral forest and enforces its structural
//! constraints on the single mutating entry point:
//! - no self-referrals
//! - at most one referrer per candidate (unique parent)
//! - no directed cycles

use super::types::UserId;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when recording a referral
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferralError {
    #[error("user {0} cannot refer themselves")]
    SelfReferral(UserId),

    #[error("candidate {0} already has a referrer")]
    DuplicateReferrer(UserId),

    #[error("referral {referrer} -> {candidate} would close a cycle")]
    CycleDetected { referrer: UserId, candidate: UserId },
}

pub type ReferralResult<T> = Result<T, ReferralError>;

/// In-memory referral graph
///
/// Uses hash maps for O(1) lookup performance:
/// - forward: referrer -> ordered set of candidates (adjacency)
/// - referrer_of: candidate -> its unique referrer (reverse index)
///
/// Edges are append-only; `clear` is the only way to remove anything.
/// Because every candidate has at most one referrer and cycles are
/// rejected on insert, the stored edge set is always a forest.
#[derive(Debug, Default)]
pub struct ReferralGraph {
    /// Outgoing referrals for each referrer (insertion-ordered)
    forward: IndexMap<UserId, IndexSet<UserId>>,

    /// Unique referrer for each candidate, written once per candidate
    referrer_of: FxHashMap<UserId, UserId>,
}

impl ReferralGraph {
    /// Create a new empty referral graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a referral edge from `referrer` to `candidate`.
    ///
    /// Validation order is cheapest-first: self-referral, duplicate
    /// referrer, then the O(V+E) cycle check. On success the edge is
    /// inserted into both mappings and nothing else changes.
    pub fn add_referral(
        &mut self,
        referrer: impl Into<UserId>,
        candidate: impl Into<UserId>,
    ) -> ReferralResult<()> {
        let referrer = referrer.into();
        let candidate = candidate.into();

        if referrer == candidate {
            return Err(ReferralError::SelfReferral(referrer));
        }

        if self.referrer_of.contains_key(&candidate) {
            return Err(ReferralError::DuplicateReferrer(candidate));
        }

        // The edge referrer -> candidate closes a loop exactly when the
        // referrer is already downstream of the candidate.
        if self.can_reach(&candidate, &referrer) {
            debug!(%referrer, %candidate, "rejected referral: would close a cycle");
            return Err(ReferralError::CycleDetected {
                referrer,
                candidate,
            });
        }

        self.forward
            .entry(referrer.clone())
            .or_insert_with(IndexSet::new)
            .insert(candidate.clone());
        self.referrer_of.insert(candidate, referrer);
        Ok(())
    }

    /// Whether a directed path `start -> ... -> target` exists.
    ///
    /// Explicit-stack traversal; depth is bounded by memory, not the
    /// call stack, so deep chains in large networks are safe.
    fn can_reach(&self, start: &UserId, target: &UserId) -> bool {
        let mut visited: FxHashSet<&UserId> = FxHashSet::default();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if let Some(children) = self.forward.get(current) {
                for child in children {
                    if visited.insert(child) {
                        stack.push(child);
                    }
                }
            }
        }

        false
    }

    /// Direct referrals made by `user`, in insertion order.
    ///
    /// Unknown and leaf users yield an empty set, not an error.
    pub fn direct_referrals(&self, user: &UserId) -> IndexSet<UserId> {
        self.forward.get(user).cloned().unwrap_or_default()
    }

    /// The unique referrer of `user`, if any.
    pub fn referrer_of(&self, user: &UserId) -> Option<&UserId> {
        self.referrer_of.get(user)
    }

    /// True if `user` appears as a referrer or as a candidate
    pub fn has_user(&self, user: &UserId) -> bool {
        self.forward.contains_key(user) || self.referrer_of.contains_key(user)
    }

    /// Number of distinct users appearing in either role
    pub fn user_count(&self) -> usize {
        let mut users: FxHashSet<&UserId> = self.forward.keys().collect();
        users.extend(self.referrer_of.keys());
        users.len()
    }

    /// Total number of referral edges
    pub fn referral_count(&self) -> usize {
        self.forward.values().map(IndexSet::len).sum()
    }

    /// Iterate every (referrer, candidates) adjacency entry
    pub fn adjacency(&self) -> impl Iterator<Item = (&UserId, &IndexSet<UserId>)> {
        self.forward.iter()
    }

    /// Iterate every user that has made at least one referral
    pub fn referrers(&self) -> impl Iterator<Item = &UserId> {
        self.forward.keys()
    }

    /// Empty both mappings. Reset/test scenarios only.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.referrer_of.clear();
    }
}
