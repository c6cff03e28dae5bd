// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator ranks up to 7 cards by trying every 5 cards subset of the
//! hand and keeping the best one, each 5 cards hand gets a [HandCategory] and
//! a kickers signature used to break ties between hands of the same category.
//!
//! ```
//! # use holdem_odds_eval::*;
//! let cards = holdem_odds_cards::parse_cards(&["7D", "7C", "7S", "2H", "2D"]).unwrap();
//! let value = HandValue::eval(&cards).unwrap();
//! assert_eq!(value.category(), HandCategory::FullHouse);
//! assert_eq!(value.kickers(), &[5, 0]);
//! ```
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::{cmp::Ordering, fmt};

use holdem_odds_cards::{Card, Rank};

/// The category of a poker hand from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HandCategory {
    /// No pairs, straights, or flushes.
    HighCard = 1,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind plus a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight with all cards of the same suit.
    StraightFlush,
    /// An ace high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// Returns all categories from the weakest to the strongest.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        use HandCategory::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category strength, 1 for high card up to 10 for a royal flush.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The category display name.
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The value of a poker hand.
///
/// Values compare by category first and then by kickers, most significant
/// kicker first, stopping when the shorter kickers list is exhausted.
///
/// Values of hands with 5 or more cards of the same category always have
/// kickers of the same length, so the order is total for them. Partial hands
/// with fewer cards use a prefix compare: a pair of aces with no kickers is
/// equal to a pair of aces with any kickers, while two pairs of aces with
/// different kickers are not equal to each other, so equality is not
/// transitive across kickers of different lengths.
#[derive(Debug, Clone, Copy)]
pub struct HandValue {
    category: HandCategory,
    kickers: [u8; 5],
    len: u8,
}

impl HandValue {
    /// The highest rank value of an ace high straight.
    const ACE_HIGH: u8 = 12;

    /// The highest rank value of a five high straight (the wheel).
    const FIVE_HIGH: u8 = 3;

    /// Rank bits for A-2-3-4-5.
    const WHEEL: u16 = 0b1_0000_0000_1111;

    fn new(category: HandCategory, ranks: &[u8]) -> Self {
        let mut kickers = [0; 5];
        kickers[..ranks.len()].copy_from_slice(ranks);
        Self {
            category,
            kickers,
            len: ranks.len() as u8,
        }
    }

    /// Evaluates the best hand that can be made with the given cards.
    ///
    /// With 5 or more cards all the 5 cards subsets are evaluated, with fewer
    /// cards the hand is ranked as given without straights and flushes.
    /// Returns `None` if there are no cards.
    pub fn eval(cards: &[Card]) -> Option<HandValue> {
        match cards.len() {
            0 => None,
            1..=5 => Some(Self::eval_hand(cards)),
            _ => {
                let mut best: Option<HandValue> = None;
                for_each_five(cards, |hand| {
                    let value = Self::eval_hand(hand);
                    if best.is_none_or(|b| value > b) {
                        best = Some(value);
                    }
                });

                best
            }
        }
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The hand kickers, rank values from the most significant.
    pub fn kickers(&self) -> &[u8] {
        &self.kickers[..self.len as usize]
    }

    /// The hand category display name.
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    /// Evaluates a hand with at most 5 cards.
    fn eval_hand(cards: &[Card]) -> HandValue {
        debug_assert!(!cards.is_empty() && cards.len() <= 5);

        let mut counts = [0u8; Rank::COUNT];
        let mut rank_bits = 0u16;
        for c in cards {
            let rank = c.rank().value();
            counts[rank as usize] += 1;
            rank_bits |= 1 << rank;
        }

        // (count, rank) for each rank in the hand.
        let mut groups = [(0u8, 0u8); 5];
        let mut num_groups = 0;
        for (rank, &count) in counts.iter().enumerate() {
            if count > 0 {
                groups[num_groups] = (count, rank as u8);
                num_groups += 1;
            }
        }

        let groups = &mut groups[..num_groups];
        groups.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        let is_flush = cards.len() == 5 && cards.iter().all(|c| c.suit() == cards[0].suit());

        let straight_high = if num_groups == 5 {
            let (high, low) = (groups[0].1, groups[4].1);
            if high - low == 4 {
                Some(high)
            } else if rank_bits == Self::WHEEL {
                Some(Self::FIVE_HIGH)
            } else {
                None
            }
        } else {
            None
        };

        // Grouped ranks are already in kickers order.
        let mut ranks = [0u8; 5];
        for (r, g) in ranks.iter_mut().zip(groups.iter()) {
            *r = g.1;
        }
        let ranks = &ranks[..num_groups];

        let first = groups[0].0;
        let second = groups.get(1).map(|g| g.0).unwrap_or(0);

        use HandCategory::*;
        match (straight_high, is_flush) {
            (Some(Self::ACE_HIGH), true) => HandValue::new(RoyalFlush, &[]),
            (Some(high), true) => HandValue::new(StraightFlush, &[high]),
            _ if first == 4 => HandValue::new(FourOfAKind, ranks),
            _ if first == 3 && second >= 2 => HandValue::new(FullHouse, ranks),
            (_, true) => HandValue::new(Flush, ranks),
            (Some(high), false) => HandValue::new(Straight, &[high]),
            _ if first == 3 => HandValue::new(ThreeOfAKind, ranks),
            _ if first == 2 && second == 2 => HandValue::new(TwoPair, ranks),
            _ if first == 2 => HandValue::new(OnePair, ranks),
            _ => HandValue::new(HighCard, ranks),
        }
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| {
            self.kickers()
                .iter()
                .zip(other.kickers())
                .map(|(l, r)| l.cmp(r))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.label(), self.kickers())
    }
}

impl Serialize for HandValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("HandValue", 3)?;
        s.serialize_field("category", &self.category)?;
        s.serialize_field("label", self.label())?;
        s.serialize_field("kickers", self.kickers())?;
        s.end()
    }
}

/// Calls the `f` closure for each 5 cards subset of `cards`.
fn for_each_five<F>(cards: &[Card], mut f: F)
where
    F: FnMut(&[Card]),
{
    let n = cards.len();
    let mut h = [Card::default(); 5];

    for c1 in 0..n {
        h[0] = cards[c1];

        for c2 in (c1 + 1)..n {
            h[1] = cards[c2];

            for c3 in (c2 + 1)..n {
                h[2] = cards[c3];

                for c4 in (c3 + 1)..n {
                    h[3] = cards[c4];

                    for c5 in (c4 + 1)..n {
                        h[4] = cards[c5];
                        f(&h);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_odds_cards::{Deck, parse_cards};
    use rand::{SeedableRng, rngs::SmallRng};

    fn cards(codes: &str) -> Vec<Card> {
        parse_cards(&codes.split_whitespace().collect::<Vec<_>>()).unwrap()
    }

    fn eval(codes: &str) -> HandValue {
        HandValue::eval(&cards(codes)).unwrap()
    }

    fn assert_hand(codes: &str, category: HandCategory, kickers: &[u8]) {
        let value = eval(codes);
        assert_eq!(value.category(), category, "{codes}");
        assert_eq!(value.kickers(), kickers, "{codes}");
    }

    #[test]
    fn five_cards_categories() {
        use HandCategory::*;

        assert_hand("AS KS QS JS TS", RoyalFlush, &[]);
        assert_hand("9H 8H 7H 6H 5H", StraightFlush, &[7]);
        assert_hand("5D 4D 3D 2D AD", StraightFlush, &[3]);
        assert_hand("9C 9D 9H 9S 2C", FourOfAKind, &[7, 0]);
        assert_hand("3C 3D 3H KS KC", FullHouse, &[1, 11]);
        assert_hand("AH JH 8H 4H 2H", Flush, &[12, 9, 6, 2, 0]);
        assert_hand("TC 9D 8H 7S 6C", Straight, &[8]);
        assert_hand("AC KD QH JS TC", Straight, &[12]);
        assert_hand("5C 4D 3H 2S AC", Straight, &[3]);
        assert_hand("QC QD QH 7S 2C", ThreeOfAKind, &[10, 5, 0]);
        assert_hand("JC JD 4H 4S AC", TwoPair, &[9, 2, 12]);
        assert_hand("8C 8D KH 6S 3C", OnePair, &[6, 11, 4, 1]);
        assert_hand("KC JD 9H 6S 3C", HighCard, &[11, 9, 7, 4, 1]);
    }

    #[test]
    fn category_labels() {
        let labels = HandCategory::categories()
            .map(|c| (c.ordinal(), c.to_string()))
            .collect::<Vec<_>>();

        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], (1, "High Card".to_string()));
        assert_eq!(labels[6], (7, "Full House".to_string()));
        assert_eq!(labels[9], (10, "Royal Flush".to_string()));
        assert!(HandCategory::categories().rev().is_sorted_by(|a, b| a > b));
    }

    #[test]
    fn no_wrap_around_straight() {
        // Q-K-A-2-3 is not a straight.
        assert_hand("QC KD AH 2S 3C", HandCategory::HighCard, &[12, 11, 10, 1, 0]);
    }

    #[test]
    fn partial_hands() {
        use HandCategory::*;

        assert!(HandValue::eval(&[]).is_none());
        assert_hand("7S", HighCard, &[5]);
        assert_hand("AS KD", HighCard, &[12, 11]);
        assert_hand("AS AD", OnePair, &[12]);
        assert_hand("TS TD 4C", OnePair, &[8, 2]);
        assert_hand("TS TD TC", ThreeOfAKind, &[8]);
        assert_hand("AS AH KD KC", TwoPair, &[12, 11]);
        assert_hand("5S 5H 5D 5C", FourOfAKind, &[3]);

        // No flush or straights with less than 5 cards.
        assert_hand("AS KS QS JS", HighCard, &[12, 11, 10, 9]);
    }

    #[test]
    fn seven_cards_hands() {
        use HandCategory::*;

        // Hole cards A♠K♠ with board Q♠J♠T♠2♦3♣.
        assert_hand("AS KS QS JS TS 2D 3C", RoyalFlush, &[]);

        // Hole cards 7♦7♣ with board 7♠2♥2♦.
        assert_hand("7D 7C 7S 2H 2D", FullHouse, &[5, 0]);

        // Two trips make a full house with the highest trips.
        assert_hand("9S 9H 9D 4S 4H 4D KC", FullHouse, &[7, 2]);

        // Three pairs keep the two highest pairs and the best kicker.
        assert_hand("QS QH 8D 8C 3S 3H 2D", TwoPair, &[10, 6, 1]);

        // A straight flush beats the higher straight.
        assert_hand("8H 7H 6H 5H 4H 9C TD", StraightFlush, &[6]);

        // Six cards straight uses the highest run.
        assert_hand("2C 3D 4H 5S 6C 7D KH", Straight, &[5]);

        // Quads kicker is the best of the remaining cards.
        assert_hand("6S 6H 6D 6C KH KD 2S", FourOfAKind, &[4, 11]);

        // Best flush among more than five suited cards.
        assert_hand("AH 9H 7H 5H 3H 2H KC", Flush, &[12, 7, 5, 3, 1]);
    }

    #[test]
    fn compare_hands() {
        // Category dominates kickers.
        assert!(eval("2C 2D 3H 4S 5C") > eval("AC KD QH JS 9C"));
        assert!(eval("5C 4D 3H 2S AC") < eval("6C 5D 4H 3S 2C"));
        assert!(eval("AS KS QS JS TS") > eval("KS QS JS TS 9S"));

        // Kickers break ties.
        assert!(eval("8C 8D KH 6S 3C") > eval("8H 8S QH 6D 3D"));
        assert!(eval("JC JD 4H 4S AC") > eval("JH JS 4C 4D KC"));
        assert!(eval("JC JD 5H 5S 2C") > eval("JH JS 4C 4D AC"));

        // Same ranks different suits tie.
        assert_eq!(
            eval("AC KD QH JS 9C").cmp(&eval("AD KH QS JC 9D")),
            Ordering::Equal
        );
        assert_eq!(eval("AS KS QS JS TS"), eval("AH KH QH JH TH"));
    }

    fn best_of_subsets(hand: &[Card]) -> HandValue {
        (0u32..(1 << hand.len()))
            .filter(|mask| mask.count_ones() == 5)
            .map(|mask| {
                let subset = hand
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect::<Vec<_>>();
                HandValue::eval(&subset).unwrap()
            })
            .max()
            .unwrap()
    }

    fn check_best_subset(num_cards: usize, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);

        for _ in 0..2_000 {
            let deck = Deck::new_and_shuffled(&mut rng);
            let hand = &deck.cards()[..num_cards];

            let value = HandValue::eval(hand).unwrap();
            let oracle = best_of_subsets(hand);
            assert_eq!(value.category(), oracle.category(), "{hand:?}");
            assert_eq!(value.kickers(), oracle.kickers(), "{hand:?}");
        }
    }

    #[test]
    fn seven_cards_best_subset() {
        check_best_subset(7, 101);
    }

    #[test]
    fn six_cards_best_subset() {
        check_best_subset(6, 202);
    }

    #[test]
    fn partial_hands_prefix_compare() {
        let pair = eval("AS AD");
        let pair_king = eval("AS AD KC");
        let pair_queen = eval("AS AD QC");

        assert_eq!(pair, pair_king);
        assert_eq!(pair, pair_queen);
        assert!(pair_king > pair_queen);

        // Same length kickers compare all the kickers.
        assert!(eval("AS AD KC 4H 2S") > eval("AH AC KD 3C 2D"));
    }

    #[test]
    fn compare_is_total_order() {
        let mut rng = SmallRng::seed_from_u64(7);

        let values = (0..150)
            .map(|_| {
                let deck = Deck::new_and_shuffled(&mut rng);
                HandValue::eval(&deck.cards()[..5]).unwrap()
            })
            .collect::<Vec<_>>();

        for a in &values {
            for b in &values {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());

                if a.category() != b.category() {
                    assert_eq!(a.cmp(b), a.category().cmp(&b.category()));
                }

                for c in values.iter().step_by(10) {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn serialize_value() {
        let value = eval("7D 7C 7S 2H 2D");
        let json = serde_json::to_value(value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "category": "FullHouse",
                "label": "Full House",
                "kickers": [5, 0],
            })
        );
    }
}
