//! Monte Carlo equity estimation.
//!
//! Each trial completes the board from the unseen deck, deals every
//! opponent a hand from their villain pool, and scores the showdown with
//! the 7-card ranker. Credit for a trial is 1 for an outright win and
//! 1/num_tied for a chopped pot, so the per-player equities always sum
//! to 1.
//!
//! The estimator takes its randomness as an explicit parameter: the same
//! RNG state and inputs reproduce the same result bit for bit. An optional
//! deadline turns a long run into a best-effort estimate instead of
//! blowing the caller's decision budget.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::equity::pool::VillainPool;
use crate::error::EvalError;
use crate::eval::rank::check_distinct;
use crate::eval::{best_rank, Card, Deck, HandRank};

/// How many trials run between deadline checks. Coarse enough to stay off
/// the hot path, fine enough for a multi-second decision ceiling.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Options controlling one equity estimation call.
///
/// # Example
/// ```
/// use holdem_equity::equity::EquityOptions;
/// use std::time::Duration;
///
/// let options = EquityOptions::default()
///     .with_trials(20_000)
///     .with_deadline(Duration::from_secs(4));
/// assert_eq!(options.trials, 20_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityOptions {
    /// Number of Monte Carlo trials to run. Values below 1 run one trial.
    pub trials: usize,

    /// Optional wall-clock budget. When it expires the estimator returns
    /// the best-effort estimate over the trials completed so far.
    pub deadline: Option<Duration>,
}

impl Default for EquityOptions {
    fn default() -> Self {
        Self {
            trials: 10_000,
            deadline: None,
        }
    }
}

impl EquityOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the trial count.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set the wall-clock deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Result of one equity estimation call. Ephemeral, recomputed per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityResult {
    /// Equity per player in [0,1]: hero first, then opponents in input
    /// order. Sums to 1, with chopped pots credited fractionally.
    pub equities: Vec<f64>,

    /// Trials actually completed (smaller than requested if the deadline
    /// expired).
    pub trials: usize,

    /// Number of opponent draws that fell back to the full remaining deck
    /// because the villain pool had fewer than 2 eligible cards left.
    pub pool_fallbacks: usize,
}

impl EquityResult {
    /// Hero's estimated win probability.
    pub fn hero_equity(&self) -> f64 {
        self.equities[0]
    }
}

/// Estimate hero's and each opponent's equity by Monte Carlo simulation.
///
/// `hero` is the hero's hole cards, `community` the 0-5 known board cards,
/// and `pools` one villain pool per opponent (in seat order). Pools may
/// overlap each other; keeping them disjoint from the known cards is the
/// caller's responsibility, and a pool that runs dry mid-trial falls back
/// to the full remaining deck for that opponent for that trial only.
///
/// All validation happens before the sampling loop: malformed inputs never
/// surface halfway through a run.
pub fn estimate_equity<R: Rng>(
    hero: [Card; 2],
    community: &[Card],
    pools: &[VillainPool],
    options: &EquityOptions,
    rng: &mut R,
) -> Result<EquityResult, EvalError> {
    if community.len() > 5 {
        return Err(EvalError::InvalidHandSize {
            expected: "at most 5 community",
            got: community.len(),
        });
    }

    let mut known = Vec::with_capacity(2 + community.len());
    known.extend_from_slice(&hero);
    known.extend_from_slice(community);
    check_distinct(&known)?;

    let base_deck = Deck::without(&known);
    let runout = 5 - community.len();
    let needed = runout + 2 * pools.len();
    if needed > base_deck.remaining() {
        return Err(EvalError::InsufficientDeck {
            needed,
            available: base_deck.remaining(),
        });
    }

    let trials = options.trials.max(1);
    let players = pools.len() + 1;
    let start = Instant::now();

    let mut credit = vec![0.0f64; players];
    let mut fallbacks = 0usize;
    let mut completed = 0usize;

    // Scratch buffers reused across trials.
    let mut seven = [hero[0]; 7];
    let mut ranks: Vec<HandRank> = Vec::with_capacity(players);
    let mut eligible: Vec<Card> = Vec::with_capacity(52);

    for trial in 0..trials {
        if trial > 0 && trial % DEADLINE_CHECK_INTERVAL == 0 {
            if let Some(deadline) = options.deadline {
                if start.elapsed() >= deadline {
                    break;
                }
            }
        }

        let mut deck = base_deck.clone();
        deck.shuffle(rng);

        // Complete the board from the unseen deck.
        seven[2..2 + community.len()].copy_from_slice(community);
        for slot in seven[2 + community.len()..7].iter_mut() {
            *slot = deck.deal().ok_or_else(|| deck_exhausted(&deck, 1))?;
        }

        // Hero's showdown rank over hole cards + final board.
        ranks.clear();
        seven[0] = hero[0];
        seven[1] = hero[1];
        ranks.push(best_rank(&seven)?);

        // Each opponent draws from their pool minus everything already used
        // this trial (hero, board, and prior opponents' draws).
        for pool in pools {
            eligible.clear();
            eligible.extend(pool.cards().iter().copied().filter(|c| !deck.is_dealt(*c)));

            let (hole1, hole2) = if eligible.len() >= 2 {
                let mut picked = eligible.choose_multiple(rng, 2);
                let a = *picked.next().ok_or_else(|| deck_exhausted(&deck, 2))?;
                let b = *picked.next().ok_or_else(|| deck_exhausted(&deck, 2))?;
                deck.take(a);
                deck.take(b);
                (a, b)
            } else {
                // Documented fallback: the pool cannot cover this draw, so
                // the opponent plays a random unseen hand for this trial.
                fallbacks += 1;
                let a = deck.deal().ok_or_else(|| deck_exhausted(&deck, 2))?;
                let b = deck.deal().ok_or_else(|| deck_exhausted(&deck, 2))?;
                (a, b)
            };

            seven[0] = hole1;
            seven[1] = hole2;
            ranks.push(best_rank(&seven)?);
        }

        // Lowest rank wins; exact ties chop the pot evenly.
        let mut best = ranks[0];
        for rank in &ranks[1..] {
            if *rank < best {
                best = *rank;
            }
        }
        let tied = ranks.iter().filter(|r| **r == best).count();
        let share = 1.0 / tied as f64;
        for (player, rank) in ranks.iter().enumerate() {
            if *rank == best {
                credit[player] += share;
            }
        }

        completed += 1;
    }

    let equities = credit.iter().map(|c| c / completed as f64).collect();
    Ok(EquityResult {
        equities,
        trials: completed,
        pool_fallbacks: fallbacks,
    })
}

fn deck_exhausted(deck: &Deck, needed: usize) -> EvalError {
    EvalError::InsufficientDeck {
        needed,
        available: deck.remaining(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::parse_cards;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hero(s: &str) -> [Card; 2] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1]]
    }

    #[test]
    fn test_aces_heads_up_preflop() {
        // AA vs a full-deck villain pool: ~85% equity preflop.
        let hero = hero("Ah Ad");
        let pool = VillainPool::full_deck_minus(&hero);
        let options = EquityOptions::new().with_trials(20_000);
        let mut rng = StdRng::seed_from_u64(42);

        let result = estimate_equity(hero, &[], &[pool], &options, &mut rng).unwrap();
        assert_eq!(result.trials, 20_000);
        assert_eq!(result.pool_fallbacks, 0);

        let equity = result.hero_equity();
        assert!(
            (equity - 0.85).abs() < 0.02,
            "AA equity {} should be 0.85 +/- 0.02",
            equity
        );
    }

    #[test]
    fn test_deterministic_given_seed() {
        let hero = hero("Ks Qs");
        let board = parse_cards("Jh 7d 2c").unwrap();
        let pool = VillainPool::full_deck_minus(
            &[&hero[..], &board[..]].concat(),
        );
        let options = EquityOptions::new().with_trials(2_000);

        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = estimate_equity(hero, &board, &[pool.clone()], &options, &mut rng_a).unwrap();
        let b = estimate_equity(hero, &board, &[pool], &options, &mut rng_b).unwrap();

        assert_eq!(a.equities, b.equities);
        assert_eq!(a.trials, b.trials);
    }

    #[test]
    fn test_equities_sum_to_one() {
        let hero = hero("Ah Kh");
        let dead = parse_cards("Ah Kh").unwrap();
        let pools = vec![
            VillainPool::full_deck_minus(&dead),
            VillainPool::full_deck_minus(&dead),
            VillainPool::full_deck_minus(&dead),
        ];
        let options = EquityOptions::new().with_trials(3_000);
        let mut rng = StdRng::seed_from_u64(11);

        let result = estimate_equity(hero, &[], &pools, &options, &mut rng).unwrap();
        assert_eq!(result.equities.len(), 4);
        let sum: f64 = result.equities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "equities sum to {}", sum);
        for equity in &result.equities {
            assert!((0.0..=1.0).contains(equity));
        }
    }

    #[test]
    fn test_board_plays_chops_every_trial() {
        // Broadway on the board, nobody can improve past it: every trial is
        // an exact tie, so both players chop to 0.5.
        let hero = hero("7s 2h");
        let board = parse_cards("As Ks Qd Jc Th").unwrap();
        let dead = [&hero[..], &board[..]].concat();
        let pool = VillainPool::full_deck_minus(&dead);
        let options = EquityOptions::new().with_trials(2_000);
        let mut rng = StdRng::seed_from_u64(3);

        let result = estimate_equity(hero, &board, &[pool], &options, &mut rng).unwrap();
        assert!((result.hero_equity() - 0.5).abs() < 1e-12);
        assert!((result.equities[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_restricted_pool_is_respected() {
        // Villain pool of exactly {Ks, Kd} forces KK every trial.
        let hero = hero("As Ad");
        let pool = VillainPool::new(parse_cards("Ks Kd").unwrap());
        let options = EquityOptions::new().with_trials(5_000);
        let mut rng = StdRng::seed_from_u64(19);

        let result = estimate_equity(hero, &[], &[pool], &options, &mut rng).unwrap();
        assert_eq!(result.pool_fallbacks, 0);

        // AA vs KK preflop is ~82%.
        let equity = result.hero_equity();
        assert!(
            (equity - 0.82).abs() < 0.03,
            "AA vs KK equity {} should be ~0.82",
            equity
        );
    }

    #[test]
    fn test_shared_pool_never_duplicates_cards() {
        // Two villains share a 4-card pool; the second always gets the two
        // cards the first left behind, so hero's overpair wins every trial.
        let hero = hero("As Ad");
        let board = parse_cards("2c 7c 8d 9h Jh").unwrap();
        let shared = VillainPool::new(parse_cards("Ks Kd Qs Qd").unwrap());
        let pools = vec![shared.clone(), shared];
        let options = EquityOptions::new().with_trials(500);
        let mut rng = StdRng::seed_from_u64(23);

        let result = estimate_equity(hero, &board, &pools, &options, &mut rng).unwrap();
        assert_eq!(result.pool_fallbacks, 0);
        assert!((result.hero_equity() - 1.0).abs() < 1e-12);
        assert!(result.equities[1].abs() < 1e-12);
        assert!(result.equities[2].abs() < 1e-12);
    }

    #[test]
    fn test_pool_exhaustion_falls_back_to_deck() {
        // The villain's only candidates are dead on the board, so every
        // trial takes the documented full-deck fallback.
        let hero = hero("As Ad");
        let board = parse_cards("Ks Qh 7d").unwrap();
        let pool = VillainPool::new(parse_cards("Ks Kd").unwrap());
        let options = EquityOptions::new().with_trials(300);
        let mut rng = StdRng::seed_from_u64(31);

        let result = estimate_equity(hero, &board, &[pool], &options, &mut rng).unwrap();
        assert_eq!(result.pool_fallbacks, 300);
        assert_eq!(result.trials, 300);
    }

    #[test]
    fn test_input_validation() {
        let hero_cards = hero("As Ad");

        // Hero card duplicated on the board.
        let board = parse_cards("As Kh Qd").unwrap();
        let pool = VillainPool::full_deck_minus(&hero_cards);
        let options = EquityOptions::default();
        let mut rng = StdRng::seed_from_u64(0);
        let result = estimate_equity(hero_cards, &board, &[pool.clone()], &options, &mut rng);
        assert!(matches!(result, Err(EvalError::DuplicateCard(_))));

        // Too many community cards.
        let board = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        let result = estimate_equity(hero_cards, &board, &[pool.clone()], &options, &mut rng);
        assert!(matches!(
            result,
            Err(EvalError::InvalidHandSize { got: 6, .. })
        ));

        // More opponents than the deck can seat.
        let pools = vec![pool; 25];
        let result = estimate_equity(hero_cards, &[], &pools, &options, &mut rng);
        assert!(matches!(result, Err(EvalError::InsufficientDeck { .. })));
    }

    #[test]
    fn test_zero_trials_still_runs_one() {
        let hero = hero("As Ad");
        let pool = VillainPool::full_deck_minus(&hero);
        let options = EquityOptions::new().with_trials(0);
        let mut rng = StdRng::seed_from_u64(1);

        let result = estimate_equity(hero, &[], &[pool], &options, &mut rng).unwrap();
        assert_eq!(result.trials, 1);
    }

    #[test]
    fn test_expired_deadline_returns_best_effort() {
        let hero = hero("As Ad");
        let pool = VillainPool::full_deck_minus(&hero);
        let options = EquityOptions::new()
            .with_trials(1_000_000)
            .with_deadline(Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(5);

        let result = estimate_equity(hero, &[], &[pool], &options, &mut rng).unwrap();
        // An already-expired deadline stops at the first check, never at zero.
        assert_eq!(result.trials, DEADLINE_CHECK_INTERVAL);
        let sum: f64 = result.equities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_opponents_is_certain_win() {
        let hero = hero("7s 2h");
        let options = EquityOptions::new().with_trials(100);
        let mut rng = StdRng::seed_from_u64(13);

        let result = estimate_equity(hero, &[], &[], &options, &mut rng).unwrap();
        assert_eq!(result.equities, vec![1.0]);
    }
}
