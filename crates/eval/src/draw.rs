// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draw targets.
//!
//! Given the final hand of a draw player and how many cards the player drew,
//! guess which cards were kept.
use equilab_cards::{Card, CardSet, Deck};

use crate::{
    Error, Result,
    combin::{kth_combination, nck},
    game::DUMMY,
    value::{HandRank, HandValue},
};

/// The category a one or two cards draw is assumed to never aim for.
pub const DRAW_CEILING: HandRank = HandRank::StraightFlush;

/// Returns the cards a player likely kept before drawing `discards` cards to
/// end up with `hand`.
///
/// Draws of one or two cards search for the strongest hand below a straight
/// flush that can be made by replacing that many cards, see
/// [drawing_hand_below].
///
/// ```
/// # use equilab_eval::*;
/// let hand = parse_cards("AhAd2c3d4c").unwrap();
/// assert_eq!(drawing_hand(&hand, 3).unwrap(), parse_cards("AhAd").unwrap());
/// ```
pub fn drawing_hand(hand: &[Card], discards: usize) -> Result<Vec<Card>> {
    drawing_hand_below(hand, discards, DRAW_CEILING)
}

/// Like [drawing_hand] with completions of category `ceiling` or better
/// ignored by the one and two cards search.
pub fn drawing_hand_below(
    hand: &[Card],
    discards: usize,
    ceiling: HandRank,
) -> Result<Vec<Card>> {
    if discards > 5 {
        return Err(Error::InvalidDrawCount(discards));
    }

    let hand: &[Card; 5] = hand.try_into().map_err(|_| Error::InvalidHandSize {
        len: hand.len(),
        min: 5,
        max: 5,
    })?;

    let mut seen = CardSet::default();
    for &card in hand {
        if !seen.insert(card) {
            return Err(Error::DuplicateCard(card));
        }
    }

    let kept = match discards {
        0 => hand.to_vec(),
        1 | 2 => best_draw(hand, discards, ceiling)?,
        3 => best_pair(hand),
        4 => hand.iter().max().into_iter().copied().collect(),
        _ => Vec::new(),
    };

    Ok(kept)
}

/// Tries every way to keep `5 - discards` cards and draw the rest.
fn best_draw(hand: &[Card; 5], discards: usize, ceiling: HandRank) -> Result<Vec<Card>> {
    let deck = Deck::remaining(&[hand.as_slice()])?;
    let deck = deck.cards();

    let keep = 5 - discards;
    let mut full = [DUMMY; 5];
    let mut best = (HandValue::NONE, 0);

    for pk in 0..nck(5, keep) {
        kth_combination(keep, pk, hand, &mut full, 0);
        for pd in 0..nck(deck.len(), discards) {
            kth_combination(discards, pd, deck, &mut full, keep);

            let v = HandValue::eval(&full);
            if v.rank() < ceiling && v > best.0 {
                best = (v, pk);
            }
        }
    }

    // Only reachable with a ceiling of HighCard, keep the first cards.
    kth_combination(keep, best.1, hand, &mut full, 0);
    Ok(full[..keep].to_vec())
}

/// Returns the highest pair in the hand, or the two highest cards.
fn best_pair(hand: &[Card; 5]) -> Vec<Card> {
    let mut sorted = *hand;
    sorted.sort_by(|a, b| b.cmp(a));

    let pair = sorted
        .windows(2)
        .find(|w| w[0].rank() == w[1].rank())
        .map(|w| w[0].rank());

    match pair {
        Some(rank) => hand.iter().filter(|c| c.rank() == rank).take(2).copied().collect(),
        None => sorted[..2].to_vec(),
    }
}
