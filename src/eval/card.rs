//! Card representation and deck handling.
//!
//! Cards are packed into a single `u32` so that everything the ranking hot
//! path needs comes out with one mask or shift:
//!
//! ```text
//! +--------+--------+--------+--------+
//! |xxxbbbbb|bbbbbbbb|ssssrrrr|pppppppp|
//! +--------+--------+--------+--------+
//! bits  0-7   p: prime assigned to the rank (2,3,5,...,41)
//! bits  8-11  r: rank index (0-12: deuce-ace)
//! bits 12-15  s: one-hot suit bit
//! bits 16-28  b: one-hot rank bit
//! ```
//!
//! ANDing the suit fields of five cards is nonzero exactly when they share a
//! suit; ORing the rank fields gives the distinct-rank mask used for straight
//! detection; multiplying the primes gives a product unique to the rank
//! multiset, which keys the pair/trips/quads lookup table.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::error::EvalError;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Distinct small primes assigned to the 13 ranks, deuce first.
///
/// The product of five primes identifies a rank multiset uniquely (unique
/// factorization), which is what makes the paired-hand lookup table work.
pub const RANK_PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Rank characters for display (canonical form is uppercase).
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single playing card, packed for O(1) field extraction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(u32);

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self(
            RANK_PRIMES[rank as usize]
                | ((rank as u32) << 8)
                | (1u32 << (12 + suit))
                | (1u32 << (16 + rank)),
        )
    }

    /// Create a card from its ID (0-51: rank * 4 + suit).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self::new(id / 4, id % 4)
    }

    /// Get the card's ID (0-51), used for deck bitmask bookkeeping.
    #[inline]
    pub fn id(&self) -> u8 {
        self.rank() * 4 + self.suit()
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        ((self.0 >> 12) & 0xF).trailing_zeros() as u8
    }

    /// Get the prime assigned to the card's rank.
    #[inline]
    pub fn prime(&self) -> u32 {
        self.0 & 0xFF
    }

    /// Get the one-hot suit mask (bit `suit` set).
    #[inline]
    pub fn suit_bit(&self) -> u8 {
        ((self.0 >> 12) & 0xF) as u8
    }

    /// Get the one-hot rank mask (bit `rank` set).
    #[inline]
    pub fn rank_bit(&self) -> u16 {
        ((self.0 >> 16) & 0x1FFF) as u16
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = EvalError;

    /// Parse a card from a 2-character string like "As", "kh", "2C".
    ///
    /// Parsing is case-insensitive; the canonical encoding is uppercase rank
    /// plus lowercase suit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !s.is_ascii() {
            return Err(EvalError::InvalidCardFormat(s.to_string()));
        }

        let rank_char = (bytes[0] as char).to_ascii_uppercase();
        let suit_char = (bytes[1] as char).to_ascii_lowercase();

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == rank_char)
            .ok_or_else(|| EvalError::InvalidCardFormat(s.to_string()))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == suit_char)
            .ok_or_else(|| EvalError::InvalidCardFormat(s.to_string()))?;

        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a run of card strings like "As Kd" or "AsKdQh" into cards.
///
/// Whitespace and commas between cards are ignored; anything else must form
/// 2-character card tokens.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EvalError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    if compact.len() % 2 != 0 {
        return Err(EvalError::InvalidCardFormat(s.to_string()));
    }
    let mut cards = Vec::with_capacity(compact.len() / 2);
    let bytes = compact.as_bytes();
    for chunk in bytes.chunks(2) {
        let token = std::str::from_utf8(chunk)
            .map_err(|_| EvalError::InvalidCardFormat(s.to_string()))?;
        cards.push(token.parse()?);
    }
    Ok(cards)
}

/// A deck of 52 playing cards.
#[derive(Clone)]
pub struct Deck {
    /// All usable cards; `[index..size]` is the undealt region.
    cards: [Card; 52],
    /// Index of next card to deal.
    index: usize,
    /// Number of usable cards in the deck (52 minus dead cards).
    size: usize,
    /// Bitmask over card IDs of dead and dealt cards.
    dealt_mask: u64,
}

impl Deck {
    /// Create a new deck in standard order.
    pub fn new() -> Self {
        let mut cards = [Card::from_id(0); 52];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = Card::from_id(i as u8);
        }
        Self {
            cards,
            index: 0,
            size: 52,
            dealt_mask: 0,
        }
    }

    /// Create a deck with specific cards removed (already seen as dead).
    pub fn without(dead_cards: &[Card]) -> Self {
        let mut dead_mask = 0u64;
        for card in dead_cards {
            dead_mask |= 1u64 << card.id();
        }

        let mut deck = Self::new();
        deck.dealt_mask = dead_mask;
        let mut write_idx = 0;
        for id in 0..52u8 {
            if dead_mask & (1u64 << id) == 0 {
                deck.cards[write_idx] = Card::from_id(id);
                write_idx += 1;
            }
        }
        deck.size = write_idx;
        deck
    }

    /// Shuffle the undealt portion of the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards[self.index..self.size].shuffle(rng);
    }

    /// Deal the next card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        if self.index >= self.size {
            return None;
        }
        let card = self.cards[self.index];
        self.index += 1;
        self.dealt_mask |= 1u64 << card.id();
        Some(card)
    }

    /// Remove a specific undealt card from the deck.
    ///
    /// Returns `false` if the card is dead or was already dealt. Used when a
    /// card's identity comes from outside the deck order (a villain pool
    /// draw) but must still be accounted against the deck.
    pub fn take(&mut self, card: Card) -> bool {
        if self.is_dealt(card) {
            return false;
        }
        // Swap the card to the front of the undealt region and consume it.
        if let Some(pos) = self.cards[self.index..self.size]
            .iter()
            .position(|c| *c == card)
        {
            self.cards.swap(self.index, self.index + pos);
            self.index += 1;
            self.dealt_mask |= 1u64 << card.id();
            true
        } else {
            false
        }
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.size - self.index
    }

    /// Check if a card is dead or has been dealt.
    pub fn is_dealt(&self, card: Card) -> bool {
        self.dealt_mask & (1u64 << card.id()) != 0
    }

    /// Get remaining cards as a slice.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.index..self.size]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}
