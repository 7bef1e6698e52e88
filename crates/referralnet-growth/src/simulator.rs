//! Expected-value referral growth simulation
//!
//! Models a fixed population of adopters, each with a finite referral
//! capacity, and accumulates the expected number of referrals per day.
//! The recurrence is fully deterministic: identical inputs always
//! produce identical output.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Growth simulation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of synthetic adopters in the population
    pub population_size: usize,
    /// Expected referrals each adopter can make before going inactive
    pub capacity: f64,
    /// Upper bound on the day-count search in `days_to_target`
    pub max_search_days: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            capacity: 10.0,
            max_search_days: 10_000,
        }
    }
}

/// Per-run adopter state, rebuilt at the start of every simulation
#[derive(Clone, Debug)]
struct Adopter {
    remaining_capacity: f64,
    active: bool,
}

/// Deterministic day-stepped growth simulator
#[derive(Clone, Debug, Default)]
pub struct GrowthSimulator {
    pub config: SimulationConfig,
}

impl GrowthSimulator {
    /// Create a simulator with the default population (100 adopters,
    /// capacity 10)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Expected cumulative referral counts, one entry per day.
    ///
    /// Each day every active adopter contributes `p` expected referrals
    /// and spends `p` of its remaining capacity; adopters at capacity
    /// <= 0 go inactive and stop contributing. This is an expectation
    /// recurrence, not a random trial.
    pub fn simulate(&self, p: f64, days: usize) -> Vec<f64> {
        let mut adopters = vec![
            Adopter {
                remaining_capacity: self.config.capacity,
                active: true,
            };
            self.config.population_size
        ];

        let mut cumulative = Vec::with_capacity(days);
        let mut running = 0.0;

        for _ in 0..days {
            let active_count = adopters
                .iter()
                .filter(|a| a.active && a.remaining_capacity > 0.0)
                .count();
            running += active_count as f64 * p;
            cumulative.push(running);

            for adopter in adopters
                .iter_mut()
                .filter(|a| a.active && a.remaining_capacity > 0.0)
            {
                adopter.remaining_capacity -= p;
                if adopter.remaining_capacity <= 0.0 {
                    adopter.active = false;
                }
            }
        }

        cumulative
    }

    /// Minimal day count whose cumulative expectation reaches `target`,
    /// or `None` if the configured search bound is exhausted first.
    ///
    /// Binary search on days, exploiting that the cumulative series is
    /// non-decreasing in the day count.
    pub fn days_to_target(&self, p: f64, target: f64) -> Option<usize> {
        let mut lo = 1usize;
        let mut hi = self.config.max_search_days;

        if self.final_cumulative(p, hi) < target {
            debug!(p, target, bound = hi, "target unreachable within day bound");
            return None;
        }

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.final_cumulative(p, mid) >= target {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        Some(lo)
    }

    fn final_cumulative(&self, p: f64, days: usize) -> f64 {
        self.simulate(p, days).last().copied().unwrap_or(0.0)
    }
}
