//! Poker hand ranking.
//!
//! `rank5` maps an exact 5-card hand to a single integer where **lower is
//! stronger**; `best_rank` extends that to 6- and 7-card sets by taking the
//! minimum over every 5-card subset. Consumers rely on the total ordering,
//! not on the literal magnitudes.
//!
//! The evaluation path is: straight detection from ORed rank bits, flush
//! detection from ANDed suit bits, then a prime-product table lookup for
//! every paired pattern. High cards and flushes fall through to a direct
//! kicker packing.

use crate::error::EvalError;
use crate::eval::card::Card;
use crate::eval::tables::{pack_ranks, RankTables};

/// Hand rank categories, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    StraightFlush = 0,
    FourOfAKind = 1,
    FullHouse = 2,
    Flush = 3,
    Straight = 4,
    ThreeOfAKind = 5,
    TwoPair = 6,
    OnePair = 7,
    HighCard = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::OnePair => "One Pair",
            HandCategory::HighCard => "High Card",
        }
    }
}

/// Bits reserved below the category index for the intra-category offset.
/// Five base-13 digits need at most 13^5 - 1 = 371292 < 2^20.
const CATEGORY_SHIFT: u32 = 20;

/// A comparable hand rank. Lower values are stronger hands.
///
/// Layout: category index in the bits above [`CATEGORY_SHIFT`], significant
/// ranks packed as base-13 digits below. Hands of identical true strength
/// map to equal values; hands of different strength never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(u32);

impl HandRank {
    /// Build a rank from a category and its significant ranks, repeated
    /// ranks first, then kickers, high to low.
    fn from_ranks(category: HandCategory, ranks: &[u8]) -> Self {
        Self::from_parts(category, pack_ranks(ranks))
    }

    /// Build a rank from a category and a precomputed intra-category offset.
    pub(crate) fn from_parts(category: HandCategory, offset: u32) -> Self {
        debug_assert!(offset < (1 << CATEGORY_SHIFT));
        Self(((category as u32) << CATEGORY_SHIFT) | offset)
    }

    /// Get the raw rank value for comparison. Lower is stronger.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        match self.0 >> CATEGORY_SHIFT {
            0 => HandCategory::StraightFlush,
            1 => HandCategory::FourOfAKind,
            2 => HandCategory::FullHouse,
            3 => HandCategory::Flush,
            4 => HandCategory::Straight,
            5 => HandCategory::ThreeOfAKind,
            6 => HandCategory::TwoPair,
            7 => HandCategory::OnePair,
            _ => HandCategory::HighCard,
        }
    }
}

impl std::fmt::Display for HandRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.category().name(), self.0)
    }
}

/// Find the high rank of a straight from a distinct-rank bitmask.
///
/// Returns the rank index of the straight's top card; the wheel
/// (A-2-3-4-5) reports a 5-high straight so it orders below every other
/// straight.
fn straight_high(rank_bits: u16) -> Option<u8> {
    if rank_bits.count_ones() != 5 {
        return None;
    }
    // 13 consecutive-rank windows, ace-high first.
    for high in (4..=12u8).rev() {
        if rank_bits == 0b11111 << (high - 4) {
            return Some(high);
        }
    }
    // Wheel: A-2-3-4-5 (bit 12 plus bits 0-3).
    if rank_bits == 0b1_0000_0000_1111 {
        return Some(3);
    }
    None
}

/// Check that no card appears twice in the input.
pub(crate) fn check_distinct(cards: &[Card]) -> Result<(), EvalError> {
    let mut seen = 0u64;
    for card in cards {
        let bit = 1u64 << card.id();
        if seen & bit != 0 {
            return Err(EvalError::DuplicateCard(*card));
        }
        seen |= bit;
    }
    Ok(())
}

/// Rank an exact 5-card hand. Lower result = stronger hand.
///
/// Fails with `InvalidHandSize` unless exactly 5 cards are given, and with
/// `DuplicateCard` if any card repeats.
pub fn rank5(cards: &[Card]) -> Result<HandRank, EvalError> {
    if cards.len() != 5 {
        return Err(EvalError::InvalidHandSize {
            expected: "exactly 5",
            got: cards.len(),
        });
    }
    check_distinct(cards)?;
    Ok(rank5_unchecked(&[cards[0], cards[1], cards[2], cards[3], cards[4]]))
}

/// Rank 5 cards already known to be distinct.
fn rank5_unchecked(cards: &[Card; 5]) -> HandRank {
    let mut rank_bits = 0u16;
    let mut suit_and = 0xFu8;
    let mut product = 1u64;
    for card in cards {
        rank_bits |= card.rank_bit();
        suit_and &= card.suit_bit();
        product *= card.prime() as u64;
    }

    let is_flush = suit_and != 0;

    if let Some(high) = straight_high(rank_bits) {
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return HandRank::from_ranks(category, &[high]);
    }

    if is_flush {
        return HandRank::from_ranks(HandCategory::Flush, &ranks_desc(cards));
    }

    if let Some((category, offset)) = RankTables::global().paired_lookup(product) {
        return HandRank::from_parts(category, offset);
    }

    HandRank::from_ranks(HandCategory::HighCard, &ranks_desc(cards))
}

/// The 5 card ranks sorted high to low.
fn ranks_desc(cards: &[Card; 5]) -> [u8; 5] {
    let mut ranks = [0u8; 5];
    for (slot, card) in ranks.iter_mut().zip(cards.iter()) {
        *slot = card.rank();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks
}

/// Rank the best 5-card hand from a 5-7 card set.
///
/// Enumerates every C(n,5) subset (1, 6, or 21) and returns the minimum
/// `rank5`. Pure and deterministic.
pub fn best_rank(cards: &[Card]) -> Result<HandRank, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::InvalidHandSize {
            expected: "between 5 and 7",
            got: n,
        });
    }
    check_distinct(cards)?;

    let mut best = rank5_unchecked(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    for m in (l + 1)..n {
                        let hand = [cards[i], cards[j], cards[k], cards[l], cards[m]];
                        let rank = rank5_unchecked(&hand);
                        if rank < best {
                            best = rank;
                        }
                    }
                }
            }
        }
    }
    Ok(best)
}
