//! # Holdem Equity
//!
//! Hand ranking and Monte Carlo equity estimation for Texas Hold'em bots
//! operating under a per-decision time budget.
//!
//! ## Features
//!
//! - **Packed Card Codec**: O(1) rank/suit/prime extraction from a `u32`
//! - **Total-Order Hand Ranker**: one comparable integer per 5-card hand,
//!   lower = stronger, exact ties and only exact ties collide
//! - **Best-Hand Search**: minimum rank over all 5-card subsets of 6-7 cards
//! - **Equity Estimator**: seeded, deadline-aware Monte Carlo sampling
//!   against per-opponent restricted card pools
//!
//! ## Quick Start
//!
//! ```
//! use holdem_equity::{estimate_equity, parse_cards, EquityOptions, VillainPool};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let hero = parse_cards("Ah Ad").unwrap();
//! let pool = VillainPool::full_deck_minus(&hero);
//! let options = EquityOptions::new().with_trials(5_000);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = estimate_equity([hero[0], hero[1]], &[], &[pool], &options, &mut rng).unwrap();
//! assert!(result.hero_equity() > 0.8); // pocket aces
//! ```
//!
//! ## Modules
//!
//! - [`eval`]: card codec, rank lookup tables, 5-7 card hand ranking
//! - [`equity`]: villain pools and the Monte Carlo equity estimator
//! - [`error`]: the crate-wide error type
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌──────────────────┐
//! │ Card Codec │───▶│ Hand Ranker │───▶│ Best-Hand Search │
//! └────────────┘    └─────────────┘    └──────────────────┘
//!                                               │
//!                      villain pools + RNG      ▼
//!                   (caller-supplied)   ┌──────────────────┐
//!                  ────────────────────▶│ Equity Estimator │
//!                                       └──────────────────┘
//! ```
//!
//! Everything is created fresh per decision; the only long-lived state is
//! the immutable rank lookup table, built once per process and shared
//! read-only across concurrent calls. The estimator never reads a hidden
//! RNG, so identical seeds reproduce identical results.
//!
//! Betting strategy, opponent classification, and table-state I/O are out
//! of scope: callers hand this crate parsed cards and get back ranks and
//! equities. Any error should be treated as a signal to take the safest
//! action, never as a reason to crash the host.

#![warn(missing_docs)]

/// Crate-wide error type.
pub mod error;

/// Hand evaluation: card codec, lookup tables, and ranking.
pub mod eval;

/// Equity estimation: villain pools and Monte Carlo sampling.
pub mod equity;

// Re-export commonly used types at crate root for convenience
pub use equity::{estimate_equity, EquityOptions, EquityResult, VillainPool};
pub use error::EvalError;
pub use eval::{best_rank, parse_cards, rank5, Card, Deck, HandCategory, HandRank};
