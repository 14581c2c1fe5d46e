//! Precomputed rank lookup tables.
//!
//! Non-flush, non-straight 5-card hands are classified by which ranks repeat.
//! Since each rank carries a distinct prime, the product of a hand's five
//! primes identifies its rank multiset uniquely, so every paired pattern
//! (quads, full houses, trips, two pair, one pair) can be enumerated once at
//! startup and resolved with a single hash lookup afterwards.
//!
//! The tables are built on first use and shared read-only for the rest of the
//! process; concurrent decision calls never synchronize on them.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::eval::card::RANK_PRIMES;
use crate::eval::rank::HandCategory;

/// Pack significant ranks (most significant first) into a base-13 offset.
///
/// Each digit is `12 - rank`, so stronger ranks produce smaller offsets and
/// the resulting number orders hands weakest-last within a category.
pub(crate) fn pack_ranks(ranks: &[u8]) -> u32 {
    ranks.iter().fold(0u32, |acc, &r| acc * 13 + (12 - r) as u32)
}

/// Immutable lookup tables for paired-hand classification.
pub struct RankTables {
    /// Prime product of the 5 cards -> (category, intra-category offset).
    paired: FxHashMap<u64, (HandCategory, u32)>,
}

/// Number of distinct paired 5-card rank patterns:
/// 156 quads + 156 full houses + 858 trips + 858 two pairs + 2860 pairs.
const PAIRED_PATTERNS: usize = 4888;

impl RankTables {
    /// Get the process-wide tables, building them on first use.
    pub fn global() -> &'static RankTables {
        static TABLES: OnceLock<RankTables> = OnceLock::new();
        TABLES.get_or_init(RankTables::build)
    }

    /// Look up the prime product of a paired hand.
    ///
    /// Returns `None` when the product belongs to five distinct ranks
    /// (straight, flush, or high card, which are classified elsewhere).
    pub(crate) fn paired_lookup(&self, product: u64) -> Option<(HandCategory, u32)> {
        self.paired.get(&product).copied()
    }

    /// Number of paired patterns in the table.
    pub fn len(&self) -> usize {
        self.paired.len()
    }

    /// Check whether the table is empty (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.paired.is_empty()
    }

    fn build() -> Self {
        let mut paired = FxHashMap::with_capacity_and_hasher(PAIRED_PATTERNS, Default::default());

        let prime = |rank: u8| RANK_PRIMES[rank as usize] as u64;

        // Four of a kind: quad rank + one kicker.
        for quad in 0..13u8 {
            for kicker in (0..13u8).filter(|&k| k != quad) {
                let product = prime(quad).pow(4) * prime(kicker);
                let offset = pack_ranks(&[quad, kicker]);
                paired.insert(product, (HandCategory::FourOfAKind, offset));
            }
        }

        // Full house: trip rank over pair rank.
        for trip in 0..13u8 {
            for pair in (0..13u8).filter(|&p| p != trip) {
                let product = prime(trip).pow(3) * prime(pair).pow(2);
                let offset = pack_ranks(&[trip, pair]);
                paired.insert(product, (HandCategory::FullHouse, offset));
            }
        }

        // Three of a kind: trip rank + two kickers.
        for trip in 0..13u8 {
            for hi in (0..13u8).filter(|&k| k != trip) {
                for lo in (0..hi).filter(|&k| k != trip) {
                    let product = prime(trip).pow(3) * prime(hi) * prime(lo);
                    let offset = pack_ranks(&[trip, hi, lo]);
                    paired.insert(product, (HandCategory::ThreeOfAKind, offset));
                }
            }
        }

        // Two pair: both pair ranks + one kicker.
        for hi in 0..13u8 {
            for lo in 0..hi {
                for kicker in (0..13u8).filter(|&k| k != hi && k != lo) {
                    let product = prime(hi).pow(2) * prime(lo).pow(2) * prime(kicker);
                    let offset = pack_ranks(&[hi, lo, kicker]);
                    paired.insert(product, (HandCategory::TwoPair, offset));
                }
            }
        }

        // One pair: pair rank + three kickers.
        for pair in 0..13u8 {
            for k1 in (0..13u8).filter(|&k| k != pair) {
                for k2 in (0..k1).filter(|&k| k != pair) {
                    for k3 in (0..k2).filter(|&k| k != pair) {
                        let product = prime(pair).pow(2) * prime(k1) * prime(k2) * prime(k3);
                        let offset = pack_ranks(&[pair, k1, k2, k3]);
                        paired.insert(product, (HandCategory::OnePair, offset));
                    }
                }
            }
        }

        debug_assert_eq!(paired.len(), PAIRED_PATTERNS);
        Self { paired }
    }
}
