//! Hand evaluation: card codec, rank lookup tables, and the hand ranker.
//!
//! The pipeline is strictly leaf-first: [`card`] packs the 52-card domain
//! into integers, [`tables`] precomputes the paired-hand lookup once per
//! process, and [`rank`] turns 5-7 card sets into totally ordered
//! [`HandRank`] values (lower = stronger).

pub mod card;
pub mod rank;
pub mod tables;

// Re-export main types for convenient access
pub use card::{parse_cards, Card, Deck, RANK_PRIMES};
pub use rank::{best_rank, rank5, HandCategory, HandRank};
pub use tables::RankTables;
