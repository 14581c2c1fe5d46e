//! Equity estimation: villain pools and the Monte Carlo estimator.
//!
//! [`pool`] holds the restricted-card-pool interface the surrounding range
//! model feeds; [`estimate`] samples deck completions and aggregates
//! win/tie credit into per-player equities.

pub mod estimate;
pub mod pool;

// Re-export main types for convenient access
pub use estimate::{estimate_equity, EquityOptions, EquityResult};
pub use pool::VillainPool;
