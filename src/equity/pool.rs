//! Villain card pools.
//!
//! A pool is the set of cards an opponent could plausibly be holding,
//! produced by whatever range model the caller runs (betting-pattern
//! classification is out of scope here). The estimator only ever reads a
//! pool; narrowing it is entirely the caller's business.

use crate::eval::{Card, Deck};

/// A read-only set of candidate hole cards for one opponent.
///
/// Pools owned by the caller may overlap across opponents; the estimator
/// keeps each simulation trial duplicate-free regardless.
#[derive(Debug, Clone)]
pub struct VillainPool {
    cards: Vec<Card>,
}

impl VillainPool {
    /// Create a pool from candidate cards. Duplicate entries are collapsed
    /// so no card can ever be drawn twice from the same pool.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut seen = 0u64;
        let mut unique = Vec::with_capacity(cards.len());
        for card in cards {
            let bit = 1u64 << card.id();
            if seen & bit == 0 {
                seen |= bit;
                unique.push(card);
            }
        }
        Self { cards: unique }
    }

    /// Create the widest possible pool: the full deck minus known dead cards.
    pub fn full_deck_minus(dead: &[Card]) -> Self {
        let deck = Deck::without(dead);
        Self {
            cards: deck.remaining_cards().to_vec(),
        }
    }

    /// Candidate cards in this pool.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of candidate cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the pool has no candidates.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if the pool contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::parse_cards;

    #[test]
    fn test_full_deck_minus() {
        let dead = parse_cards("As Ah").unwrap();
        let pool = VillainPool::full_deck_minus(&dead);
        assert_eq!(pool.len(), 50);
        assert!(!pool.contains(dead[0]));
        assert!(!pool.contains(dead[1]));
    }

    #[test]
    fn test_duplicates_collapsed() {
        let cards = parse_cards("Ks Ks Kd").unwrap();
        let pool = VillainPool::new(cards);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_empty_pool() {
        let pool = VillainPool::new(Vec::new());
        assert!(pool.is_empty());
    }
}
