// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity requests.
//!
//! A [Request] holds the cards known to one player: the board, the hands to
//! compare and the dead cards. [equity] validates the request and picks an
//! engine, full enumeration once the flop is out and random sampling before
//! the flop or for draw games.
use log::debug;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use equilab_cards::{Card, Deck, parse_cards};

use crate::{Error, Result, equity::MultiEquity, exact, game::Game, sampled};

/// Equity calculation settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of random boards for board games without a flop.
    pub board_samples: usize,
    /// Number of random draws for draw games with missing cards.
    pub draw_samples: usize,
    /// Seed for the sampling engine, if none the seed is random.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_samples: 1_000,
            draw_samples: 100_000,
            seed: None,
        }
    }
}

/// A flag to stop a running calculation.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Steps between cancellation checks.
    const CHECK_INTERVAL: usize = 1024;

    /// Requests the calculation to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Checks if the calculation should stop.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Fails with [Error::Cancelled] on every 1024th step after a cancel.
    #[inline]
    pub(crate) fn check(&self, step: usize) -> Result<()> {
        if step % Self::CHECK_INTERVAL == 0 && self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    #[cfg(feature = "worker")]
    pub(crate) fn same(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// An equity request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The game type.
    pub game: Game,
    /// The known board cards.
    pub board: Vec<Card>,
    /// The known cards of each hand.
    pub holes: Vec<Vec<Card>>,
    /// Dead cards.
    pub blockers: Vec<Card>,
}

impl Request {
    /// Creates a request without board or blockers.
    pub fn new(game: Game, holes: Vec<Vec<Card>>) -> Self {
        Self {
            game,
            board: Vec::new(),
            holes,
            blockers: Vec::new(),
        }
    }

    /// Creates a request from card strings like "AhKd".
    pub fn parse(game: Game, board: &str, holes: &[&str], blockers: &str) -> Result<Self> {
        Ok(Self {
            game,
            board: parse_cards(board)?,
            holes: holes
                .iter()
                .map(|h| parse_cards(h))
                .collect::<std::result::Result<_, _>>()?,
            blockers: parse_cards(blockers)?,
        })
    }

    /// Sets the board cards.
    pub fn with_board(mut self, board: Vec<Card>) -> Self {
        self.board = board;
        self
    }

    /// Sets the dead cards.
    pub fn with_blockers(mut self, blockers: Vec<Card>) -> Self {
        self.blockers = blockers;
        self
    }

    /// Checks the request and returns the unseen cards.
    fn validate(&self) -> Result<Deck> {
        let game = self.game;
        if self.holes.is_empty() {
            return Err(Error::NoHands);
        }

        let board_ok = if game.has_board() {
            matches!(self.board.len(), 0 | 3 | 4 | 5)
        } else {
            self.board.is_empty()
        };

        if !board_ok {
            return Err(Error::InvalidBoardSize(self.board.len()));
        }

        let limits = game.hole_cards();
        if let Some(hole) = self.holes.iter().find(|h| !limits.contains(&h.len())) {
            return Err(Error::InvalidHandSize {
                len: hole.len(),
                min: *limits.start(),
                max: *limits.end(),
            });
        }

        let mut used = vec![self.board.as_slice(), self.blockers.as_slice()];
        used.extend(self.holes.iter().map(|h| h.as_slice()));
        let deck = Deck::remaining(&used)?;

        let needed = if game.has_board() {
            5 - self.board.len()
        } else {
            self.holes.iter().map(|h| 5 - h.len()).sum()
        };

        if needed > deck.count() {
            return Err(Error::DeckExhausted {
                needed,
                remaining: deck.count(),
            });
        }

        Ok(deck)
    }
}

/// Computes the equity of each hand in the request.
///
/// Returns one [MultiEquity] per hand in the request order. Boards with at
/// least three cards are enumerated exactly, empty boards and incomplete draw
/// hands are sampled.
///
/// ```
/// # use equilab_eval::*;
/// let req = Request::parse(Game::Holdem, "Kh7h2d3s", &["Ah9h", "KsKc"], "").unwrap();
/// let meqs = equity(&req, &Config::default()).unwrap();
/// assert!(meqs[0].exact);
/// assert_eq!(meqs[0].main().outs.len(), 7);
/// ```
pub fn equity(req: &Request, config: &Config) -> Result<Vec<MultiEquity>> {
    equity_with_cancel(req, config, &CancelToken::default())
}

/// Like [equity] but stops with [Error::Cancelled] when `cancel` is set.
pub fn equity_with_cancel(
    req: &Request,
    config: &Config,
    cancel: &CancelToken,
) -> Result<Vec<MultiEquity>> {
    let deck = req.validate()?;
    let game = req.game;

    debug!(
        "{game} equity board {} hands {} blockers {}",
        req.board.len(),
        req.holes.len(),
        req.blockers.len()
    );

    if !game.has_board() {
        sampled::draw_equity(game, &req.holes, deck.cards(), config, cancel)
    } else if req.board.len() >= 3 {
        exact::board_equity(game, &req.board, &req.holes, deck.cards(), cancel)
    } else {
        sampled::board_equity(game, &req.board, &req.holes, deck.cards(), config, cancel)
    }
}
