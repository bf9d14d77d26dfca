// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game types and their hand valuations.
use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive};

use equilab_cards::{Card, Rank, Suit};

use crate::{
    combin::{kth_combination, nck},
    value::HandValue,
};

/// A game type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    /// Texas Hold'em.
    Holdem,
    /// Omaha high.
    Omaha,
    /// Omaha high-low eight-or-better.
    OmahaHiLo,
    /// Five cards draw high.
    FiveCardDraw,
    /// Deuce-to-seven single draw lowball.
    DeuceSevenDraw,
    /// Ace-to-five draw lowball.
    AceFiveDraw,
}

/// The way a pot, or half a pot, is awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquityType {
    /// The best high hand wins the pot.
    HighOnly,
    /// The high half of a hi/lo split pot.
    HiloHighHalf,
    /// The ace-to-five eight-or-better half of a hi/lo split pot.
    HiloLowHalf,
    /// The best ace-to-five low wins the pot.
    AceFiveLow,
    /// The best deuce-to-seven low wins the pot.
    DeuceSevenLow,
}

impl fmt::Display for EquityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquityType::HighOnly => "High",
            EquityType::HiloHighHalf => "Hi/Lo High Half",
            EquityType::HiloLowHalf => "Hi/Lo Low Half",
            EquityType::AceFiveLow => "Ace to Five Low",
            EquityType::DeuceSevenLow => "Deuce to Seven Low",
        };

        write!(f, "{name}")
    }
}

/// The values of a hand, the main valuation and the hi/lo low valuation.
///
/// The second slot is [HandValue::NONE] for games without a split pot.
pub(crate) type Values = [HandValue; 2];

/// Placeholder for hand slots that are overwritten before evaluation.
pub(crate) const DUMMY: Card = Card::new(Rank::Deuce, Suit::Clubs);

impl Game {
    /// Checks if the game has community cards.
    pub fn has_board(&self) -> bool {
        matches!(self, Game::Holdem | Game::Omaha | Game::OmahaHiLo)
    }

    /// Checks if the pot is split between high and low hands.
    pub fn is_hilo(&self) -> bool {
        matches!(self, Game::OmahaHiLo)
    }

    /// The number of hole cards accepted for an equity calculation.
    ///
    /// Draw hands with less than five cards have their missing cards dealt
    /// from the deck.
    pub fn hole_cards(&self) -> RangeInclusive<usize> {
        match self {
            Game::Holdem => 1..=2,
            Game::Omaha | Game::OmahaHiLo => 2..=4,
            Game::FiveCardDraw | Game::DeuceSevenDraw | Game::AceFiveDraw => 1..=5,
        }
    }

    /// The equity types reported for each hand.
    pub fn equity_types(&self) -> &'static [EquityType] {
        match self {
            Game::Holdem | Game::Omaha | Game::FiveCardDraw => &[EquityType::HighOnly],
            Game::OmahaHiLo => &[
                EquityType::HighOnly,
                EquityType::HiloHighHalf,
                EquityType::HiloLowHalf,
            ],
            Game::DeuceSevenDraw => &[EquityType::DeuceSevenLow],
            Game::AceFiveDraw => &[EquityType::AceFiveLow],
        }
    }

    /// Values a five cards hand.
    #[inline]
    pub(crate) fn values(&self, hand: &[Card; 5]) -> Values {
        match self {
            Game::Holdem | Game::Omaha | Game::FiveCardDraw => {
                [HandValue::eval(hand), HandValue::NONE]
            }
            Game::OmahaHiLo => [HandValue::eval(hand), HandValue::eval_low8(hand)],
            Game::DeuceSevenDraw => [HandValue::eval_deuce_seven(hand), HandValue::NONE],
            Game::AceFiveDraw => [HandValue::eval_ace_five(hand), HandValue::NONE],
        }
    }

    /// Best values of a hand using hole cards and board cards.
    ///
    /// Hold'em uses any 0 to 2 hole cards, Omaha exactly 2. The high and low
    /// values are picked independently. Returns NONE values if the cards can't
    /// make a five cards hand.
    pub(crate) fn best_values(&self, board: &[Card], hole: &[Card]) -> Values {
        debug_assert!(self.has_board());

        let min = if matches!(self, Game::Holdem) { 0 } else { 2 };
        let max = hole.len().min(2);

        let mut hand = [DUMMY; 5];
        let mut best = [HandValue::NONE; 2];

        for n in min..=max {
            if board.len() + n < 5 {
                continue;
            }

            let nh = nck(hole.len(), n);
            let nb = nck(board.len(), 5 - n);
            for kh in 0..nh {
                kth_combination(n, kh, hole, &mut hand, 0);
                for kb in 0..nb {
                    kth_combination(5 - n, kb, board, &mut hand, n);
                    let [hi, lo] = self.values(&hand);
                    best[0] = best[0].max(hi);
                    best[1] = best[1].max(lo);
                }
            }
        }

        best
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Game::Holdem => "Hold'em",
            Game::Omaha => "Omaha",
            Game::OmahaHiLo => "Omaha Hi/Lo",
            Game::FiveCardDraw => "5 Card Draw",
            Game::DeuceSevenDraw => "2-7 Single Draw",
            Game::AceFiveDraw => "A-5 Draw",
        };

        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::HandRank;
    use equilab_cards::parse_cards;

    fn best(game: Game, board: &str, hole: &str) -> Values {
        game.best_values(&parse_cards(board).unwrap(), &parse_cards(hole).unwrap())
    }

    #[test]
    fn holdem_uses_any_hole_cards() {
        // Board plays.
        let [hi, lo] = best(Game::Holdem, "AhKhQhJhTh", "2c3d");
        assert_eq!(hi.rank(), HandRank::StraightFlush);
        assert!(lo.is_none());

        // One hole card.
        let [hi, _] = best(Game::Holdem, "AhKhQhJc2d", "Th7c");
        assert_eq!(hi.rank(), HandRank::Straight);

        // Single hole card hands.
        let [hi, _] = best(Game::Holdem, "AhAdKhKc2d", "As");
        assert_eq!(hi.rank(), HandRank::FullHouse);
    }

    #[test]
    fn omaha_uses_two_hole_cards() {
        // Four hearts on board and one heart in hand is not a flush.
        let [hi, _] = best(Game::Omaha, "AhKhQh7h2c", "Jh9c8d3s");
        assert_eq!(hi.rank(), HandRank::HighCard);

        let [hi, _] = best(Game::Holdem, "AhKhQh7h2c", "Jh9c");
        assert_eq!(hi.rank(), HandRank::Flush);

        // Quads on board play as trips.
        let [hi, _] = best(Game::Omaha, "9c9d9h9s2c", "AhKd3c4d");
        assert_eq!(hi.rank(), HandRank::ThreeOfAKind);
        assert_eq!(hi.ranks(), [9, 14, 13, 0, 0]);
    }

    #[test]
    fn omaha_hilo_values() {
        let [hi, lo] = best(Game::OmahaHiLo, "2c5d7hKsQd", "Ah3dKcJh");
        assert_eq!(hi.rank(), HandRank::OnePair);
        assert_eq!(lo.ranks(), [7, 5, 3, 2, 1]);

        // Only one low hole card, no low.
        let [_, lo] = best(Game::OmahaHiLo, "2c5d7hKsQd", "Ah9dKcJh");
        assert!(lo.is_none());
    }

    #[test]
    fn incomplete_hands() {
        let [hi, lo] = best(Game::Holdem, "2c5d7h", "Ah");
        assert!(hi.is_none());
        assert!(lo.is_none());

        let [hi, _] = best(Game::Holdem, "2c5d7h", "AhAd");
        assert_eq!(hi.rank(), HandRank::OnePair);
    }

    #[test]
    fn game_limits() {
        assert_eq!(Game::Holdem.hole_cards(), 1..=2);
        assert_eq!(Game::OmahaHiLo.hole_cards(), 2..=4);
        assert_eq!(Game::FiveCardDraw.hole_cards(), 1..=5);
        assert_eq!(Game::OmahaHiLo.equity_types().len(), 3);
        assert_eq!(Game::Omaha.equity_types(), &[EquityType::HighOnly]);
        assert!(!Game::FiveCardDraw.has_board());
    }
}
