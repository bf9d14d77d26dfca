// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors for invalid cards input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The token is not a face followed by a suit.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// The same card appears more than once.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// A Poker card.
///
/// Cards order by rank first and then by suit, so sorting a hand in reverse
/// order puts the highest faces first.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// The face value with the ace high, from 2 to 14.
    #[inline]
    pub fn face(&self) -> u8 {
        self.rank as u8
    }

    /// The face value with the ace low, from 1 (ace) to 13 (king).
    #[inline]
    pub fn low_face(&self) -> u8 {
        match self.rank {
            Rank::Ace => 1,
            r => r as u8,
        }
    }

    /// The card position in a default ordered deck, 0 to 51.
    #[inline]
    pub fn index(&self) -> usize {
        (self.rank as usize - 2) * 4 + self.suit as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses a two characters token like `Ah`, `Td` or `2c`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidCard(s.to_string());

        let mut chars = s.chars();
        let (Some(face), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let rank = Rank::from_char(face).ok_or_else(invalid)?;
        let suit = Suit::from_char(suit).ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}

/// Parses a list of cards.
///
/// Tokens can be separated by whitespace or commas and a token may hold more
/// than one card (`"AhKd"`, `"Ah Kd"` and `"Ah,Kd"` are the same hand). Fails
/// if a token is malformed or if a card appears twice.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardError> {
    let mut seen = CardSet::default();
    let mut cards = Vec::new();

    for token in s.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }

        if !token.is_ascii() || token.len() % 2 != 0 {
            return Err(CardError::InvalidCard(token.to_string()));
        }

        for pos in (0..token.len()).step_by(2) {
            let card = token[pos..pos + 2].parse::<Card>()?;
            if !seen.insert(card) {
                return Err(CardError::DuplicateCard(card));
            }

            cards.push(card);
        }
    }

    Ok(cards)
}

/// Card rank, the discriminant is the ace high face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };

        write!(f, "{suit}")
    }
}

/// A set of cards stored as a 52 bits mask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardSet(u64);

impl CardSet {
    /// Adds a card, returns false if the card was already in the set.
    #[inline]
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// Checks if a card is in the set.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.index()) != 0
    }

    /// Number of cards in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::default();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Returns the cards left after removing all the `used` cards.
    ///
    /// The remaining cards keep the default deck order. Fails if a card appears
    /// more than once across all the used slices.
    pub fn remaining(used: &[&[Card]]) -> Result<Self, CardError> {
        let mut dead = CardSet::default();
        for &card in used.iter().flat_map(|cards| cards.iter()) {
            if !dead.insert(card) {
                return Err(CardError::DuplicateCard(card));
            }
        }

        let cards = Deck::default()
            .cards
            .into_iter()
            .filter(|c| !dead.contains(*c))
            .collect();

        Ok(Self { cards })
    }

    /// Deals a card from the deck, returns None if the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// The deck cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Rank::ranks()
            .flat_map(|r| Suit::suits().map(move |s| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
