//! Referral bonus sizing
//!
//! Binary search over step-quantized bonus amounts, evaluating each
//! candidate through a caller-supplied adoption curve and the growth
//! simulator.

use crate::simulator::GrowthSimulator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bounds for the bonus search space
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BonusSearchConfig {
    /// Largest bonus amount considered
    pub max_bonus: f64,
    /// Quantization step; every candidate bonus is a multiple of this
    pub step: f64,
}

impl Default for BonusSearchConfig {
    fn default() -> Self {
        Self {
            max_bonus: 100_000.0,
            step: 10.0,
        }
    }
}

/// Binary-search bonus optimizer over the growth simulator
#[derive(Clone, Debug, Default)]
pub struct BonusOptimizer {
    pub simulator: GrowthSimulator,
    pub config: BonusSearchConfig,
}

impl BonusOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_simulator(simulator: GrowthSimulator, config: BonusSearchConfig) -> Self {
        Self { simulator, config }
    }

    /// Minimal quantized bonus whose simulated cumulative referrals at
    /// `days` reach `target - epsilon`, or `None` if even `max_bonus`
    /// falls short.
    ///
    /// `adoption_prob` maps a bonus amount to a referral probability
    /// and is trusted to be monotone non-decreasing; it is not
    /// validated here. That monotonicity is what makes the acceptance
    /// predicate monotone in the bonus and the binary search sound.
    pub fn min_bonus_for_target<F>(
        &self,
        days: usize,
        target: f64,
        adoption_prob: F,
        epsilon: f64,
    ) -> Option<f64>
    where
        F: Fn(f64) -> f64,
    {
        let steps = (self.config.max_bonus / self.config.step).floor() as usize;

        let reaches = |step_index: usize| {
            let bonus = step_index as f64 * self.config.step;
            let p = adoption_prob(bonus);
            let series = self.simulator.simulate(p, days);
            series.last().copied().unwrap_or(0.0) >= target - epsilon
        };

        if !reaches(steps) {
            debug!(days, target, max_bonus = self.config.max_bonus, "no bonus reaches target");
            return None;
        }

        let mut lo = 0usize;
        let mut hi = steps;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if reaches(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        let bonus = lo as f64 * self.config.step;
        debug!(bonus, days, target, "bonus search converged");
        Some(bonus)
    }
}
