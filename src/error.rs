//! Error types shared across the evaluator and the equity estimator.
//!
//! Every fallible API in the crate returns `Result<_, EvalError>`. Errors are
//! surfaced at the call boundary, before any ranking or sampling work begins;
//! the only mid-loop condition (a villain pool running out of cards) is
//! absorbed by the documented full-deck fallback and reported as a counter,
//! not an error.

use crate::eval::Card;

/// Errors produced by card parsing, hand ranking, and equity estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A card string was not a valid `[rank][suit]` pair.
    InvalidCardFormat(String),
    /// The same card appeared twice within one evaluation's input set.
    DuplicateCard(Card),
    /// A ranking function was given the wrong number of cards.
    InvalidHandSize {
        /// Human-readable description of the accepted cardinality.
        expected: &'static str,
        /// Number of cards actually supplied.
        got: usize,
    },
    /// The deck cannot supply enough unique cards for a simulation trial.
    InsufficientDeck {
        /// Cards the trial needed to draw.
        needed: usize,
        /// Cards actually available.
        available: usize,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::InvalidCardFormat(text) => {
                write!(f, "Invalid card string {:?} (expected e.g. \"As\", \"Td\", \"2c\")", text)
            }
            EvalError::DuplicateCard(card) => {
                write!(f, "Card {} appears more than once in the input", card)
            }
            EvalError::InvalidHandSize { expected, got } => {
                write!(f, "Expected {} cards, got {}", expected, got)
            }
            EvalError::InsufficientDeck { needed, available } => {
                write!(f, "Deck exhausted: needed {} cards, only {} available", needed, available)
            }
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EvalError::InvalidCardFormat("xz".to_string());
        assert!(err.to_string().contains("xz"));

        let err = EvalError::InvalidHandSize { expected: "exactly 5", got: 4 };
        assert!(err.to_string().contains("exactly 5"));
        assert!(err.to_string().contains('4'));

        let err = EvalError::InsufficientDeck { needed: 12, available: 3 };
        assert!(err.to_string().contains("12"));
    }
}
