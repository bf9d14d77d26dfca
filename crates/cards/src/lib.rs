// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab playing cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use equilab_cards::{Card, Rank, Suit, parse_cards};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = "Kd".parse::<Card>().unwrap();
//! assert_eq!(parse_cards("Ah Kd").unwrap(), vec![ah, kd]);
//! ```
//!
//! and a [Deck] type that computes the cards left in the deck once the board,
//! the players hands and any dead cards have been removed:
//!
//! ```
//! # use equilab_cards::{Deck, parse_cards};
//! let board = parse_cards("2h3d4s").unwrap();
//! let hands = parse_cards("AhAdKhKd").unwrap();
//! let deck = Deck::remaining(&[board.as_slice(), hands.as_slice()]).unwrap();
//! assert_eq!(deck.count(), 45);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardError, CardSet, Deck, Rank, Suit, parse_cards};
