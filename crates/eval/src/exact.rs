// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Exhaustive board enumeration.
use log::{debug, trace};

use equilab_cards::Card;

use crate::{
    Result,
    calc::CancelToken,
    combin::{binomial, kth_combination},
    equity::{MultiEquity, Tally},
    game::{DUMMY, Game, Values},
    value::HandValue,
};

/// Computes the equity of each hand on every completion of a board with at
/// least three cards.
///
/// With one card to come the completion card is reported as an out for the
/// hands it turns into sole winners.
pub(crate) fn board_equity(
    game: Game,
    board: &[Card],
    holes: &[Vec<Card>],
    deck: &[Card],
    cancel: &CancelToken,
) -> Result<Vec<MultiEquity>> {
    debug_assert!(game.has_board() && (3..=5).contains(&board.len()));

    let k = 5 - board.len();
    let count = binomial(deck.len(), k)? as usize;
    debug!(
        "Exact {game} equity for {} hands, {} cards left, {count} boards",
        holes.len(),
        deck.len(),
    );

    let mut tally = Tally::new(game, holes.len(), deck.len(), true);
    let mut vals: Vec<Values> = vec![[HandValue::NONE; 2]; holes.len()];

    for (v, hole) in vals.iter_mut().zip(holes) {
        *v = game.best_values(board, hole);
    }

    tally.set_current(&vals);

    let mut full = [DUMMY; 5];
    full[..board.len()].copy_from_slice(board);

    for p in 0..count {
        cancel.check(p)?;

        kth_combination(k, p, deck, &mut full, board.len());
        for (v, hole) in vals.iter_mut().zip(holes) {
            *v = game.best_values(&full, hole);
        }

        let out = (k == 1).then_some(full[4]);
        tally.record(&vals, out);
    }

    let meqs = tally.finish();
    if k == 1 {
        for (idx, meq) in meqs.iter().enumerate() {
            trace!("Hand {idx} outs {:?}", meq.main().outs);
        }
    }

    Ok(meqs)
}
