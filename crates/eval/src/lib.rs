// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab poker hand valuation and equity engine.
//!
//! Values five cards hands for high and low games and computes the equity of
//! Hold'em, Omaha and draw hands. Once the flop is known every possible board
//! is enumerated using the combinatorial number system, before the flop and
//! for draw games with unknown cards the equity is sampled.
//!
//! To compare two hands use [HandValue]:
//!
//! ```
//! # use equilab_eval::*;
//! let flush = parse_cards("AhKhQhJh9h").unwrap().try_into().unwrap();
//! let quads = parse_cards("2c2d2h2s3c").unwrap().try_into().unwrap();
//! assert!(HandValue::eval(&quads) > HandValue::eval(&flush));
//! assert_eq!(HandValue::eval(&flush).rank(), HandRank::Flush);
//! ```
//!
//! To compute the equity of some hands build a [Request]:
//!
//! ```
//! # use equilab_eval::*;
//! let req = Request::parse(Game::Holdem, "2h3d4s", &["AhAd", "KhKd"], "").unwrap();
//! let meqs = equity(&req, &Config::default()).unwrap();
//! assert!(meqs[0].main().win > 80.0);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod calc;
mod combin;
mod draw;
mod equity;
mod error;
mod exact;
mod game;
mod sampled;
mod value;
#[cfg(feature = "worker")]
mod worker;

pub use calc::{CancelToken, Config, Request, equity, equity_with_cancel};
pub use combin::{MAX_N, binomial, kth_combination};
pub use draw::{DRAW_CEILING, drawing_hand, drawing_hand_below};
pub use equity::{Equity, MultiEquity};
pub use error::{Error, Result};
pub use game::{EquityType, Game};
pub use value::{HandRank, HandValue};
#[cfg(feature = "worker")]
pub use worker::Calculator;

// Reexport cards types.
pub use equilab_cards::{Card, Deck, Rank, Suit, parse_cards};
