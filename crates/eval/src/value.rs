// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards hand valuation.
//!
//! A [HandValue] packs the hand category and up to five tiebreak ranks in a
//! single integer:
//!
//! ```text
//!   +--------+--------+--------+--------+
//!   |xxxxxxxl|cccc1111|22223333|44445555|
//!   +--------+--------+--------+--------+
//!   c = hand category (high card=0, ..., straight flush=8)
//!   1..5 = tiebreak ranks, most significant first
//!   l = low hand flag
//! ```
//!
//! Low hands store the category and ranks of the hand inverted in the lower 24
//! bits so that for every valuation a larger value is a better hand.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use equilab_cards::Card;

/// The hand categories from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    /// Number of hand categories.
    pub const COUNT: usize = 9;

    /// Returns all ranks from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
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
        ]
        .into_iter()
    }

    /// A short name for tables.
    pub fn short_name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "H",
            HandRank::OnePair => "P",
            HandRank::TwoPair => "2P",
            HandRank::ThreeOfAKind => "3K",
            HandRank::Straight => "S",
            HandRank::Flush => "F",
            HandRank::FullHouse => "FH",
            HandRank::FourOfAKind => "4K",
            HandRank::StraightFlush => "SF",
        }
    }

    fn from_bits(bits: u32) -> HandRank {
        HandRank::ranks()
            .nth(bits as usize)
            .unwrap_or(HandRank::StraightFlush)
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pairs",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{name}")
    }
}

const RANK_SHIFT: u32 = 20;
const TIEBREAK_MASK: u32 = (1 << RANK_SHIFT) - 1;
const LOW_FLAG: u32 = 1 << 24;
const LOW_MASK: u32 = LOW_FLAG - 1;

/// The value of a five cards hand, a larger value is a better hand.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandValue(u32);

impl HandValue {
    /// The value of a missing hand, or of a hand without a qualifying low,
    /// worse than any other value.
    pub const NONE: HandValue = HandValue(0);

    /// Evaluates the high value of a five cards hand.
    pub fn eval(hand: &[Card; 5]) -> HandValue {
        HandValue(high_value(hand, true))
    }

    /// Evaluates an ace-to-five eight-or-better low hand.
    ///
    /// Returns [HandValue::NONE] if any card is above eight or if the hand has
    /// a pair, in both cases there is no qualifying low.
    pub fn eval_low8(hand: &[Card; 5]) -> HandValue {
        if hand.iter().any(|c| c.low_face() > 8) {
            return HandValue::NONE;
        }

        let v = pair_value(hand.iter().map(|c| c.low_face()));
        if v >> RANK_SHIFT != HandRank::HighCard as u32 {
            return HandValue::NONE;
        }

        HandValue::low(v)
    }

    /// Evaluates an ace-to-five low hand.
    ///
    /// Aces are low, straights and flushes don't count and a paired hand is
    /// worse than any unpaired hand.
    pub fn eval_ace_five(hand: &[Card; 5]) -> HandValue {
        HandValue::low(pair_value(hand.iter().map(|c| c.low_face())))
    }

    /// Evaluates a deuce-to-seven low hand.
    ///
    /// Aces are always high, straights and flushes count against the hand and
    /// A-2-3-4-5 is not a straight.
    pub fn eval_deuce_seven(hand: &[Card; 5]) -> HandValue {
        HandValue::low(high_value(hand, false))
    }

    /// Inverts a hand value so that the worst high hand is the best low.
    fn low(v: u32) -> HandValue {
        debug_assert!(v < LOW_FLAG);
        HandValue(LOW_FLAG | (LOW_MASK - v))
    }

    /// The value as ranked by the high valuation, for low values this undoes
    /// the inversion.
    fn inner(&self) -> u32 {
        if self.is_low() {
            LOW_MASK - (self.0 & LOW_MASK)
        } else {
            self.0
        }
    }

    /// Checks if this is the value of a low hand.
    pub fn is_low(&self) -> bool {
        self.0 & LOW_FLAG != 0
    }

    /// Checks if this is a missing value.
    pub fn is_none(&self) -> bool {
        *self == HandValue::NONE
    }

    /// The hand category.
    ///
    /// For low values this is the category of the cards themselves, for
    /// example an ace-to-five low with a pair returns [HandRank::OnePair].
    pub fn rank(&self) -> HandRank {
        HandRank::from_bits(self.inner() >> RANK_SHIFT)
    }

    /// The tiebreak ranks, most significant first, unused slots are zero.
    ///
    /// Ranks are face values, 2 to 14 for high values or 1 to 13 when aces are
    /// low.
    pub fn ranks(&self) -> [u8; 5] {
        let tb = self.inner() & TIEBREAK_MASK;
        let mut ranks = [0; 5];
        let mut pos = 0;
        for shift in [16, 12, 8, 4, 0] {
            let r = ((tb >> shift) & 0xf) as u8;
            if r != 0 {
                ranks[pos] = r;
                pos += 1;
            }
        }

        ranks
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Low values are only compared with other low values or NONE.
        self.is_low()
            .cmp(&other.is_low())
            .then_with(|| (self.0 & LOW_MASK).cmp(&(other.0 & LOW_MASK)))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandValue({:#08x} {self})", self.0)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "nil");
        }

        let r = self.ranks().map(face_char);
        if self.is_low() {
            let n = self.ranks().iter().filter(|&&r| r != 0).count();
            let faces = r[..n].iter().map(|c| c.to_string()).collect::<Vec<_>>();
            return write!(f, "{} low", faces.join(" "));
        }

        match self.rank() {
            HandRank::StraightFlush => write!(f, "Straight Flush {} high", r[0]),
            HandRank::FourOfAKind => write!(f, "Four of a Kind {} - {}", r[0], r[1]),
            HandRank::FullHouse => write!(f, "Full House {} full of {}", r[0], r[1]),
            HandRank::Flush => write!(
                f,
                "Flush {} {} {} {} {} high",
                r[0], r[1], r[2], r[3], r[4]
            ),
            HandRank::Straight => write!(f, "Straight {} high", r[0]),
            HandRank::ThreeOfAKind => {
                write!(f, "Three of a Kind {} - {} {}", r[0], r[1], r[2])
            }
            HandRank::TwoPair => write!(f, "Two Pair {} and {} - {}", r[0], r[1], r[2]),
            HandRank::OnePair => write!(f, "Pair {} - {} {} {}", r[0], r[1], r[2], r[3]),
            HandRank::HighCard => write!(
                f,
                "{} {} {} {} {} high",
                r[0], r[1], r[2], r[3], r[4]
            ),
        }
    }
}

fn face_char(face: u8) -> char {
    match face {
        1 | 14 => 'A',
        2..=9 => (b'0' + face) as char,
        10 => 'T',
        11 => 'J',
        12 => 'Q',
        13 => 'K',
        _ => '*',
    }
}

/// Flush and straight detection with a fall back to the pairs structure.
///
/// With `wheel` set A-2-3-4-5 is a five high straight.
fn high_value(hand: &[Card; 5], wheel: bool) -> u32 {
    let mut faces = hand.map(|c| c.face());
    faces.sort_unstable_by(|a, b| b.cmp(a));

    let suit = hand[0].suit();
    let flush = hand.iter().all(|c| c.suit() == suit);

    match (flush, straight_high(&faces, wheel)) {
        (true, Some(hc)) => rank_bits(HandRank::StraightFlush) | hc as u32,
        (true, None) => rank_bits(HandRank::Flush) | pack(faces.iter().copied()),
        (false, Some(hc)) => rank_bits(HandRank::Straight) | hc as u32,
        (false, None) => pair_value(faces.iter().copied()),
    }
}

/// Returns the straight high card, faces must be sorted in descending order.
fn straight_high(faces: &[u8; 5], wheel: bool) -> Option<u8> {
    let hc = if wheel && faces[0] == 14 && faces[1] == 5 {
        5
    } else if faces[0] == faces[1] + 1 {
        faces[0]
    } else {
        return None;
    };

    faces[1..]
        .windows(2)
        .all(|w| w[0] == w[1] + 1)
        .then_some(hc)
}

/// Values a hand by its pairs structure, doesn't require sorted faces.
///
/// Faces are counted from the highest frequency to the lowest and within the
/// same frequency from the highest face to the lowest.
fn pair_value(faces: impl Iterator<Item = u8>) -> u32 {
    let mut counts = [0u8; 15];
    for f in faces {
        counts[f as usize] += 1;
    }

    let (mut quads, mut trips, mut pairs, mut kickers) = (0u32, 0u32, 0u32, 0u32);
    for f in (1..15u32).rev() {
        match counts[f as usize] {
            0 => {}
            1 => kickers = (kickers << 4) | f,
            2 => pairs = (pairs << 4) | f,
            3 => trips = f,
            _ => quads = f,
        }
    }

    if quads != 0 {
        rank_bits(HandRank::FourOfAKind) | (quads << 4) | kickers
    } else if trips != 0 && pairs != 0 {
        rank_bits(HandRank::FullHouse) | (trips << 4) | pairs
    } else if trips != 0 {
        rank_bits(HandRank::ThreeOfAKind) | (trips << 8) | kickers
    } else if pairs >= 16 {
        rank_bits(HandRank::TwoPair) | (pairs << 4) | kickers
    } else if pairs != 0 {
        rank_bits(HandRank::OnePair) | (pairs << 12) | kickers
    } else {
        rank_bits(HandRank::HighCard) | kickers
    }
}

#[inline]
fn rank_bits(rank: HandRank) -> u32 {
    (rank as u32) << RANK_SHIFT
}

fn pack(faces: impl Iterator<Item = u8>) -> u32 {
    faces.fold(0, |acc, f| (acc << 4) | f as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilab_cards::{Deck, parse_cards};
    use rand::prelude::*;

    fn hand(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&hand(s))
    }

    #[test]
    fn categories() {
        let cases = [
            ("AhKhQhJhTh", HandRank::StraightFlush),
            ("2c2d2h2s3c", HandRank::FourOfAKind),
            ("KcKdKh7s7c", HandRank::FullHouse),
            ("Ah9h7h4h2h", HandRank::Flush),
            ("9c8d7h6s5c", HandRank::Straight),
            ("Ac2d3h4s5c", HandRank::Straight),
            ("QcQdQh7s2c", HandRank::ThreeOfAKind),
            ("JcJd4h4s2c", HandRank::TwoPair),
            ("AcAd9h4s2c", HandRank::OnePair),
            ("AcJd9h4s2c", HandRank::HighCard),
        ];

        for (cards, rank) in cases {
            assert_eq!(eval(cards).rank(), rank, "{cards}");
        }
    }

    #[test]
    fn straight_flush_beats_quads() {
        let sf = eval("AhKhQhJhTh");
        let quads = eval("2c2d2h2s3c");
        let full = eval("AcAdAhKsKc");

        assert_eq!(sf.rank(), HandRank::StraightFlush);
        assert!(sf > quads);
        assert!(quads > full);
    }

    #[test]
    fn tiebreaks() {
        assert_eq!(eval("2c2d2h2s3c").ranks(), [2, 3, 0, 0, 0]);
        assert_eq!(eval("KcKdKh7s7c").ranks(), [13, 7, 0, 0, 0]);
        assert_eq!(eval("JcJd4h4s2c").ranks(), [11, 4, 2, 0, 0]);
        assert_eq!(eval("AcAd9h4s2c").ranks(), [14, 9, 4, 2, 0]);
        assert_eq!(eval("Ac2d3h4s5c").ranks(), [5, 0, 0, 0, 0]);

        // Wheel is the lowest straight.
        assert!(eval("Ac2d3h4s5c") < eval("2c3d4h5s6c"));
        assert!(eval("AcAd9h4s3c") > eval("AsAh9c4d2c"));
        assert!(eval("JcJd4h4s3c") > eval("JhJs4c4d2c"));
        assert!(eval("AcKdQhJs9c") > eval("AhKsQcJd8c"));
        assert_eq!(eval("AcKdQhJs9c"), eval("AhKsQcJd9d"));
        assert!(eval("KcKdKh2s2c") > eval("QcQdQhAsAc"));
        assert!(eval("Ah9h7h4h3h") > eval("Ac9c7c4c2c"));
    }

    #[test]
    fn permutation_invariance() {
        let mut rng = StdRng::seed_from_u64(101);
        for _ in 0..2_000 {
            let mut deck = Deck::new_and_shuffled(&mut rng).into_iter();
            let mut cards: [Card; 5] = std::array::from_fn(|_| deck.next().unwrap());

            let high = HandValue::eval(&cards);
            let low8 = HandValue::eval_low8(&cards);
            let a5 = HandValue::eval_ace_five(&cards);
            let d7 = HandValue::eval_deuce_seven(&cards);

            for _ in 0..4 {
                cards.shuffle(&mut rng);
                assert_eq!(HandValue::eval(&cards), high);
                assert_eq!(HandValue::eval_low8(&cards), low8);
                assert_eq!(HandValue::eval_ace_five(&cards), a5);
                assert_eq!(HandValue::eval_deuce_seven(&cards), d7);
            }
        }
    }

    #[test]
    fn category_dominance() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = (0..5_000)
            .map(|_| {
                let mut deck = Deck::new_and_shuffled(&mut rng).into_iter();
                let cards: [Card; 5] = std::array::from_fn(|_| deck.next().unwrap());
                HandValue::eval(&cards)
            })
            .collect::<Vec<_>>();

        for a in &values {
            for b in values.iter().take(200) {
                if a.rank() > b.rank() {
                    assert!(a > b, "{a} > {b}");
                }
            }
        }

        // The weakest hand of a category beats the strongest of the one below.
        let pairs = [
            ("2c2d3h4s5c", "AcKdQhJs9c"),
            ("3c3d2h2s4c", "AcAdKhQsJc"),
            ("2c2d2h3s4c", "AcAdKhKsQc"),
            ("Ac2d3h4s5c", "AcAdAhKsQc"),
            ("2h3h4h5h7h", "AcKdQhJsTc"),
            ("2c2d2h3s3c", "AhKhQhJh9h"),
            ("2c2d2h2s3c", "AcAdAhKsKc"),
            ("Ah2h3h4h5h", "AcAdAhAsKc"),
        ];

        for (stronger, weaker) in pairs {
            assert!(eval(stronger) > eval(weaker), "{stronger} > {weaker}");
        }
    }

    #[test]
    fn low8() {
        let nut = HandValue::eval_low8(&hand("Ac2d3h4s5c"));
        let six = HandValue::eval_low8(&hand("Ac2d3h4s6c"));
        let eight = HandValue::eval_low8(&hand("8c7d6h4s3c"));

        assert!(nut.is_low());
        assert!(nut > six);
        assert!(six > eight);
        assert!(eight > HandValue::NONE);
        assert_eq!(nut.ranks(), [5, 4, 3, 2, 1]);
        assert_eq!(nut.rank(), HandRank::HighCard);

        // Nine high or paired hands have no low.
        assert!(HandValue::eval_low8(&hand("9c2d3h4s5c")).is_none());
        assert!(HandValue::eval_low8(&hand("Ac2d3h4s4c")).is_none());
        assert!(HandValue::eval_low8(&hand("KcQdJhTs9c")).is_none());
    }

    #[test]
    fn ace_five() {
        let wheel = HandValue::eval_ace_five(&hand("Ah2h3h4h5h"));
        let king = HandValue::eval_ace_five(&hand("KcQdJh9s8c"));
        let pair = HandValue::eval_ace_five(&hand("AcAd2h3s4c"));

        // Flushes and straights don't count.
        assert_eq!(wheel, HandValue::eval_ace_five(&hand("Ac2d3h4s5c")));
        assert!(wheel > king);
        assert!(king > pair);
        assert_eq!(pair.rank(), HandRank::OnePair);
    }

    #[test]
    fn deuce_seven() {
        let nut = HandValue::eval_deuce_seven(&hand("7c5d4h3s2c"));
        let wheel = HandValue::eval_deuce_seven(&hand("Ac2d3h4s5c"));
        let straight = HandValue::eval_deuce_seven(&hand("6c5d4h3s2c"));
        let flush = HandValue::eval_deuce_seven(&hand("7h5h4h3h2h"));

        assert!(nut > wheel);
        assert_eq!(wheel.rank(), HandRank::HighCard);
        assert!(wheel > straight);
        assert_eq!(straight.rank(), HandRank::Straight);
        assert!(nut > flush);
        assert!(flush.is_low());
    }

    #[test]
    fn display() {
        assert_eq!(eval("AhKhQhJhTh").to_string(), "Straight Flush A high");
        assert_eq!(eval("2c2d2h2s3c").to_string(), "Four of a Kind 2 - 3");
        assert_eq!(eval("KcKdKh7s7c").to_string(), "Full House K full of 7");
        assert_eq!(eval("JcJd4h4s2c").to_string(), "Two Pair J and 4 - 2");
        assert_eq!(eval("AcJd9h4s2c").to_string(), "A J 9 4 2 high");
        assert_eq!(
            HandValue::eval_low8(&hand("8c6d4h3sAc")).to_string(),
            "8 6 4 3 A low"
        );
        assert_eq!(HandValue::NONE.to_string(), "nil");
    }
}
