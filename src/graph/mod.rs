//! Referral graph module
//!
//! Append-only directed referral forest with validated mutation.

pub mod store;
pub mod types;

pub use store::{ReferralGraph, ReferralError, ReferralResult};
pub use types::UserId;
