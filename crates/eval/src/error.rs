// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity calculation errors.
use thiserror::Error;

use equilab_cards::{Card, CardError};

/// Result alias for equity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the hand evaluator and the equity engines.
///
/// All errors are caller contract violations detected before any enumeration
/// starts, except [Error::Cancelled] and [Error::Worker].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A card token with an unknown face or suit.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// The same card appears twice across board, hands and blockers.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// A hand with a number of cards outside the game limits.
    #[error("invalid hand size {len}, expected {min} to {max} cards")]
    InvalidHandSize {
        /// The hand size.
        len: usize,
        /// Minimum number of cards.
        min: usize,
        /// Maximum number of cards.
        max: usize,
    },
    /// A board that is not empty, a flop, a turn or a river.
    #[error("invalid board size {0}")]
    InvalidBoardSize(usize),
    /// No hands to compute equity for.
    #[error("no hands")]
    NoHands,
    /// The binomial coefficient doesn't fit the combinations counter.
    #[error("binomial coefficient for {n} choose {k} out of range")]
    CombinatoricOverflow {
        /// Number of items.
        n: usize,
        /// Number of chosen items.
        k: usize,
    },
    /// The draw heuristic was called with more than 5 discards.
    #[error("invalid draw count {0}")]
    InvalidDrawCount(usize),
    /// Not enough unseen cards to complete every hand.
    #[error("need {needed} cards but only {remaining} left in the deck")]
    DeckExhausted {
        /// Cards needed for one iteration.
        needed: usize,
        /// Cards left in the deck.
        remaining: usize,
    },
    /// The calculation was superseded and stopped.
    #[error("calculation cancelled")]
    Cancelled,
    /// The background calculation task failed.
    #[error("equity worker failed: {0}")]
    Worker(String),
}

impl From<CardError> for Error {
    fn from(err: CardError) -> Self {
        match err {
            CardError::InvalidCard(token) => Error::InvalidCard(token),
            CardError::DuplicateCard(card) => Error::DuplicateCard(card),
        }
    }
}
