// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo odds simulation.
//!
//! A [Simulation] estimates the probability that a pair of hole cards wins,
//! ties, or loses against a number of random opponents by dealing random
//! boards and opponents cards from the cards that are not already known.
//!
//! The trials are split among a number of workers, each worker runs in its own
//! thread with a private copy of the deck and a private random generator, the
//! workers counters are summed when all workers are done.
//!
//! ```
//! # use holdem_odds_eval::*;
//! let hole = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts)];
//! let odds = Simulation::new(hole, &[], 1)
//!     .unwrap()
//!     .trials(1_000)
//!     .workers(2)
//!     .run();
//! assert!((odds.win + odds.tie + odds.loss - 1.0).abs() < 1e-9);
//! ```
use log::debug;
use rand::{SeedableRng, prelude::*, rngs::SmallRng};
use serde::Serialize;
use std::{
    cmp::Ordering,
    sync::atomic::{self, AtomicU64},
    thread,
    time::Instant,
};
use thiserror::Error;

use holdem_odds_cards::{Card, Deck, has_duplicates};

use crate::HandValue;

/// Errors for simulations that cannot be dealt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    /// The board has more than 5 cards.
    #[error("board cannot have more than 5 cards, got {0}")]
    TooManyBoardCards(usize),
    /// There must be at least one opponent.
    #[error("at least one opponent is required")]
    NoOpponents,
    /// The same card is in the hole cards or board more than once.
    #[error("hole and board cards must not contain duplicates")]
    DuplicateCards,
    /// The deck has not enough cards for the board and opponents.
    #[error("not enough cards to deal {needed} cards, {available} left in the deck")]
    NotEnoughCards {
        /// Cards needed for each trial.
        needed: usize,
        /// Cards left in the deck.
        available: usize,
    },
}

/// The result of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OddsResult {
    /// Probability of winning.
    pub win: f64,
    /// Probability of tying.
    pub tie: f64,
    /// Probability of losing.
    pub loss: f64,
    /// Number of trials won.
    pub wins: u64,
    /// Number of trials tied.
    pub ties: u64,
    /// Total number of trials.
    pub trials: u64,
}

impl OddsResult {
    fn from_counts(wins: u64, ties: u64, trials: u64) -> Self {
        let total = trials.max(1) as f64;
        let losses = trials - wins - ties;
        Self {
            win: wins as f64 / total,
            tie: ties as f64 / total,
            loss: losses as f64 / total,
            wins,
            ties,
            trials,
        }
    }

    /// Number of trials lost.
    pub fn losses(&self) -> u64 {
        self.trials - self.wins - self.ties
    }
}

/// Counters for a single worker.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: u64,
    ties: u64,
    trials: u64,
}

/// Used to give each worker a different seed.
static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A Monte Carlo simulation for a pair of hole cards.
#[derive(Debug, Clone)]
pub struct Simulation {
    hole: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
    trials: usize,
    workers: usize,
    seed: Option<u64>,
}

impl Simulation {
    /// The number of trials used when none is given.
    pub const DEFAULT_TRIALS: usize = 10_000;

    /// The number of workers used when none is given.
    pub const DEFAULT_WORKERS: usize = 4;

    /// The number of cards in a complete board.
    pub const BOARD_SIZE: usize = 5;

    /// Creates a simulation for the given hole cards, known board cards, and
    /// number of opponents.
    pub fn new(hole: [Card; 2], board: &[Card], opponents: usize) -> Result<Self, OddsError> {
        if board.len() > Self::BOARD_SIZE {
            return Err(OddsError::TooManyBoardCards(board.len()));
        }

        if opponents == 0 {
            return Err(OddsError::NoOpponents);
        }

        let known = hole.iter().chain(board).copied().collect::<Vec<_>>();
        if has_duplicates(&known) {
            return Err(OddsError::DuplicateCards);
        }

        let needed = Self::BOARD_SIZE - board.len() + 2 * opponents;
        let available = Deck::SIZE - known.len();
        if needed > available {
            return Err(OddsError::NotEnoughCards { needed, available });
        }

        Ok(Self {
            hole,
            board: board.to_vec(),
            opponents,
            trials: Self::DEFAULT_TRIALS,
            workers: Self::DEFAULT_WORKERS,
            seed: None,
        })
    }

    /// Sets the number of trials, zero uses [Self::DEFAULT_TRIALS].
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = if trials == 0 {
            Self::DEFAULT_TRIALS
        } else {
            trials
        };
        self
    }

    /// Sets the number of workers, zero uses [Self::DEFAULT_WORKERS].
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 {
            Self::DEFAULT_WORKERS
        } else {
            workers
        };
        self
    }

    /// Uses a fixed base seed for the workers random generators.
    ///
    /// Runs with the same seed, trials, and workers give the same result.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs the simulation, blocks until all trials are done.
    pub fn run(&self) -> OddsResult {
        let now = Instant::now();

        let mut deck = Deck::default();
        deck.remove_known(&self.hole);
        deck.remove_known(&self.board);

        let shares = partition(self.trials, self.workers);

        let tallies = thread::scope(|s| {
            let handles = shares
                .iter()
                .enumerate()
                .filter(|(_, trials)| **trials > 0)
                .map(|(worker_id, &trials)| {
                    let rng = self.worker_rng(worker_id);
                    let deck = &deck;
                    s.spawn(move || self.run_worker(worker_id, deck, trials, rng))
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect::<Vec<_>>()
        });

        let total = tallies.iter().fold(Tally::default(), |acc, t| Tally {
            wins: acc.wins + t.wins,
            ties: acc.ties + t.ties,
            trials: acc.trials + t.trials,
        });

        debug!(
            "Simulation {} trials {} workers done in {:.3}s",
            total.trials,
            tallies.len(),
            now.elapsed().as_secs_f64()
        );

        OddsResult::from_counts(total.wins, total.ties, total.trials)
    }

    /// Creates a random generator for a worker.
    fn worker_rng(&self, worker_id: usize) -> SmallRng {
        const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

        let stream = (worker_id as u64 + 1).wrapping_mul(GOLDEN);
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed ^ stream),
            None => {
                let counter = SEED_COUNTER.fetch_add(1, atomic::Ordering::Relaxed);
                let entropy = rand::rng().random::<u64>();
                SmallRng::seed_from_u64(entropy ^ counter.wrapping_mul(GOLDEN) ^ stream)
            }
        }
    }

    /// Runs `trials` trials on a private copy of the deck.
    fn run_worker(&self, worker_id: usize, deck: &Deck, trials: usize, mut rng: SmallRng) -> Tally {
        let mut deck = deck.clone();
        let board_len = self.board.len();
        let missing = Self::BOARD_SIZE - board_len;

        // Hole cards first then the board, the board is shared with opponents.
        let mut hero = [Card::default(); 7];
        hero[..2].copy_from_slice(&self.hole);
        hero[2..2 + board_len].copy_from_slice(&self.board);
        let mut villain = [Card::default(); 7];

        let mut tally = Tally::default();
        for _ in 0..trials {
            deck.shuffle(&mut rng);

            let (board_cards, rest) = deck.cards().split_at(missing);
            hero[2 + board_len..].copy_from_slice(board_cards);
            villain[2..].copy_from_slice(&hero[2..]);

            let hero_value = HandValue::eval(&hero);
            let best_villain = rest
                .chunks_exact(2)
                .take(self.opponents)
                .filter_map(|hole| {
                    villain[..2].copy_from_slice(hole);
                    HandValue::eval(&villain)
                })
                .max();

            match hero_value.cmp(&best_villain) {
                Ordering::Greater => tally.wins += 1,
                Ordering::Equal => tally.ties += 1,
                Ordering::Less => {}
            }

            tally.trials += 1;
        }

        debug!(
            "Worker {worker_id} {} trials {} wins {} ties",
            tally.trials, tally.wins, tally.ties
        );

        tally
    }
}

/// Estimates the odds for a pair of hole cards against `opponents` random
/// hands, zero `trials` or `workers` use the defaults.
pub fn estimate_odds(
    hole: [Card; 2],
    board: &[Card],
    opponents: usize,
    trials: usize,
    workers: usize,
) -> Result<OddsResult, OddsError> {
    let sim = Simulation::new(hole, board, opponents)?
        .trials(trials)
        .workers(workers);
    Ok(sim.run())
}

/// Splits trials among workers, the first `trials % workers` workers run one
/// more trial than the others.
fn partition(trials: usize, workers: usize) -> Vec<usize> {
    let base = trials / workers;
    let extra = trials % workers;
    (0..workers)
        .map(|worker| if worker < extra { base + 1 } else { base })
        .collect()
}
