// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em odds hand evaluator and odds simulation.
//!
//! Poker hand evaluator for 1 to 7 cards hands that finds the best 5 cards hand
//! by checking all 5 cards subsets, and a Monte Carlo simulation that estimates
//! the odds of a pair of hole cards against random opponents using parallel
//! workers.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its category:
//!
//! ```
//! # use holdem_odds_eval::*;
//! // 2S, 3S, .., JS
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]).unwrap();
//! let v2 = HandValue::eval(&cards[5..]).unwrap();
//! assert_eq!(v2.category(), HandCategory::StraightFlush);
//! assert!(v2 > v1);
//! ```
//!
//! To estimate the odds use a [Simulation] or [estimate_odds]:
//!
//! ```
//! # use holdem_odds_eval::*;
//! let hole = [Card::new(Rank::King, Suit::Hearts), Card::new(Rank::King, Suit::Clubs)];
//! let odds = estimate_odds(hole, &[], 2, 2_000, 2).unwrap();
//! assert_eq!(odds.trials, 2_000);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandCategory, HandValue};

pub mod odds;
pub use odds::{OddsError, OddsResult, Simulation, estimate_odds};

// Reexport cards types.
pub use holdem_odds_cards::{
    Card, Deck, ParseCardError, Rank, Suit, has_duplicates, parse_cards,
};
