// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo equity.
//!
//! Used when the unseen cards are too many to enumerate: boards dealt from
//! scratch and draw hands with missing cards.
use log::debug;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use equilab_cards::Card;

use crate::{
    Result,
    calc::{CancelToken, Config},
    equity::{MultiEquity, Tally},
    game::{DUMMY, Game, Values},
    value::HandValue,
};

/// Picks random cards without replacement.
///
/// Each pick swaps the chosen card past the end of the unpicked cards, so one
/// sample costs as many random numbers as cards picked.
#[derive(Debug)]
struct Picker {
    cards: Vec<Card>,
    rng: SmallRng,
}

impl Picker {
    fn new(cards: &[Card], seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Self {
            cards: cards.to_vec(),
            rng,
        }
    }

    /// Fills `dest` with distinct random cards.
    fn pick(&mut self, dest: &mut [Card]) {
        let n = self.cards.len();
        assert!(dest.len() <= n, "picking {} of {n} cards", dest.len());

        for (i, slot) in dest.iter_mut().enumerate() {
            let last = n - 1 - i;
            let pos = self.rng.random_range(0..=last);
            self.cards.swap(pos, last);
            *slot = self.cards[last];
        }
    }
}

/// Computes the equity of each hand on random completions of an empty board.
pub(crate) fn board_equity(
    game: Game,
    board: &[Card],
    holes: &[Vec<Card>],
    deck: &[Card],
    config: &Config,
    cancel: &CancelToken,
) -> Result<Vec<MultiEquity>> {
    debug_assert!(game.has_board() && board.len() < 3);

    let samples = config.board_samples.max(1);
    debug!(
        "Sampled {game} equity for {} hands, {} cards left, {samples} boards",
        holes.len(),
        deck.len(),
    );

    let mut picker = Picker::new(deck, config.seed);
    let mut tally = Tally::new(game, holes.len(), deck.len(), false);
    let mut vals: Vec<Values> = vec![[HandValue::NONE; 2]; holes.len()];

    let mut full = [DUMMY; 5];
    full[..board.len()].copy_from_slice(board);

    for n in 0..samples {
        cancel.check(n)?;

        picker.pick(&mut full[board.len()..]);
        for (v, hole) in vals.iter_mut().zip(holes) {
            *v = game.best_values(&full, hole);
        }

        tally.record(&vals, None);
    }

    Ok(tally.finish())
}

/// Computes the equity of draw hands, dealing the missing cards of each hand.
///
/// If every hand is complete there is nothing to deal and the result is a
/// single exact showdown.
pub(crate) fn draw_equity(
    game: Game,
    holes: &[Vec<Card>],
    deck: &[Card],
    config: &Config,
    cancel: &CancelToken,
) -> Result<Vec<MultiEquity>> {
    debug_assert!(!game.has_board());

    let mut hands = holes
        .iter()
        .map(|hole| {
            let mut hand = [DUMMY; 5];
            hand[..hole.len()].copy_from_slice(hole);
            hand
        })
        .collect::<Vec<_>>();

    // Cards with known values.
    let mut vals: Vec<Values> = holes
        .iter()
        .zip(&hands)
        .map(|(hole, hand)| {
            if hole.len() == 5 {
                game.values(hand)
            } else {
                [HandValue::NONE; 2]
            }
        })
        .collect();

    let blanks = holes.iter().map(|h| 5 - h.len()).sum::<usize>();
    if blanks == 0 {
        debug!("Showdown {game} equity for {} hands", holes.len());

        let mut tally = Tally::new(game, holes.len(), deck.len(), true);
        tally.set_current(&vals);
        tally.record(&vals, None);
        return Ok(tally.finish());
    }

    let samples = config.draw_samples.max(1);
    debug!(
        "Sampled {game} equity for {} hands, {blanks} blanks, {} cards left, {samples} draws",
        holes.len(),
        deck.len(),
    );

    let mut picker = Picker::new(deck, config.seed);
    let mut tally = Tally::new(game, holes.len(), deck.len(), false);
    tally.set_current(&vals);

    let mut drawn = vec![DUMMY; blanks];
    for n in 0..samples {
        cancel.check(n)?;

        picker.pick(&mut drawn);

        let mut next = drawn.iter();
        for ((v, hand), hole) in vals.iter_mut().zip(hands.iter_mut()).zip(holes) {
            for (slot, &card) in hand[hole.len()..].iter_mut().zip(next.by_ref()) {
                *slot = card;
            }

            *v = game.values(hand);
        }

        tally.record(&vals, None);
    }

    Ok(tally.finish())
}
