// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em odds cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_odds_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "kd".parse().unwrap();
//! assert_eq!(kd, Card::new(Rank::King, Suit::Diamonds));
//! assert_eq!(ah.to_string(), "AH");
//! ```
//!
//! and a [Deck] type for building, shuffling, and dealing the cards that are
//! not already known:
//!
//! ```
//! # use holdem_odds_cards::{Card, Deck, Rank, Suit};
//! let known = [
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ];
//!
//! let mut deck = Deck::default();
//! deck.remove_known(&known);
//! assert_eq!(deck.count(), 50);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit, has_duplicates};

mod parse;
pub use parse::{ParseCardError, parse_cards};
