//! Deterministic growth planning for referral programs
//!
//! A day-stepped expected-value population model (no random draws, no
//! Monte Carlo) plus two binary-search optimizers built on top of it:
//! minimal days to a referral target, and minimal referral bonus whose
//! adoption probability reaches a target within a tolerance.

pub mod bonus;
pub mod simulator;

pub use bonus::{BonusOptimizer, BonusSearchConfig};
pub use simulator::{GrowthSimulator, SimulationConfig};
