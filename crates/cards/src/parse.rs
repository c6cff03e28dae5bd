// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards codes parsing.
use std::str::FromStr;
use thiserror::Error;

use crate::{Card, Rank, Suit};

/// Card code parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The code is not two characters long.
    #[error("invalid card code: {0}")]
    InvalidCode(String),
    /// The first character is not a rank.
    #[error("invalid rank: {0}")]
    InvalidRank(char),
    /// The second character is not a suit.
    #[error("invalid suit: {0}")]
    InvalidSuit(char),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a `[Rank][Suit]` code, case insensitive (`"AS"`, `"td"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();

        let mut chars = code.chars();
        let (Some(rc), Some(sc), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError::InvalidCode(code));
        };

        let rank = Rank::from_char(rc).ok_or(ParseCardError::InvalidRank(rc))?;
        let suit = Suit::from_char(sc).ok_or(ParseCardError::InvalidSuit(sc))?;
        Ok(Card::new(rank, suit))
    }
}

/// Parses a list of card codes, fails on the first invalid code.
pub fn parse_cards<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Card>, ParseCardError> {
    codes.iter().map(|c| c.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert_eq!("AS".parse(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!("td".parse(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!(" 2c ".parse(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));
        assert_eq!("kH".parse(), Ok(Card::new(Rank::King, Suit::Hearts)));

        // Every card parses back from its code.
        for card in crate::Deck::default() {
            assert_eq!(card.to_string().parse(), Ok(card));
        }
    }

    #[test]
    fn parse_invalid_codes() {
        assert_eq!(
            "".parse::<Card>(),
            Err(ParseCardError::InvalidCode(String::new()))
        );
        assert_eq!(
            "A".parse::<Card>(),
            Err(ParseCardError::InvalidCode("A".to_string()))
        );
        assert_eq!(
            "10H".parse::<Card>(),
            Err(ParseCardError::InvalidCode("10H".to_string()))
        );
        assert_eq!("1H".parse::<Card>(), Err(ParseCardError::InvalidRank('1')));
        assert_eq!("AX".parse::<Card>(), Err(ParseCardError::InvalidSuit('X')));
    }

    #[test]
    fn parse_list() {
        let cards = parse_cards(&["AS", "KS", "qs"]).unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::Ace, Suit::Spades),
                Card::new(Rank::King, Suit::Spades),
                Card::new(Rank::Queen, Suit::Spades),
            ]
        );

        let err = parse_cards(&["AS", "ZZ"]).unwrap_err();
        assert_eq!(err.to_string(), "invalid rank: Z");

        let empty: [&str; 0] = [];
        assert!(parse_cards(&empty).unwrap().is_empty());
    }
}
