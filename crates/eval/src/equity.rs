// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity statistics.
//!
//! Both the exact and the sampled engines evaluate one completed deal at a time
//! and feed the hand values to a tally that counts wins, ties, scoops and the
//! winning categories, then converts the counts into percentages.
use serde::{Deserialize, Serialize};

use equilab_cards::Card;

use crate::{
    game::{EquityType, Game, Values},
    value::{HandRank, HandValue},
};

/// The equity of a hand for one way of awarding the pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    /// How the pot is awarded.
    pub eq_type: EquityType,
    /// Number of completions this hand won outright.
    pub wins: u32,
    /// Number of completions this hand shared.
    pub ties: u32,
    /// Win percentage.
    pub win: f64,
    /// Tie percentage.
    pub tie: f64,
    /// Number of completions won or shared with each hand category.
    pub won_rank_count: [u32; HandRank::COUNT],
    /// Percentage of completions won or shared with each hand category.
    pub won_rank: [f64; HandRank::COUNT],
    /// The hand value with the known cards.
    pub current: HandValue,
    /// The hand is the only winner with the known cards.
    pub current_win: bool,
    /// The hand shares the pot with the known cards.
    pub current_tie: bool,
    /// Cards that make this hand the only winner when it isn't now, only
    /// computed with one card to come.
    pub outs: Vec<Card>,
}

impl Equity {
    fn new(eq_type: EquityType) -> Self {
        Self {
            eq_type,
            wins: 0,
            ties: 0,
            win: 0.0,
            tie: 0.0,
            won_rank_count: [0; HandRank::COUNT],
            won_rank: [0.0; HandRank::COUNT],
            current: HandValue::NONE,
            current_win: false,
            current_tie: false,
            outs: Vec::new(),
        }
    }
}

/// The equity of a hand for all the ways the pot can be awarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiEquity {
    /// One equity for single pot games, high only, high half and low half for
    /// hi/lo games.
    pub eqs: Vec<Equity>,
    /// The equity was computed on every possible completion.
    pub exact: bool,
    /// Number of unseen cards.
    pub remaining: usize,
    /// The pot is split between high and low.
    pub hilo: bool,
    /// Expected share of the pot as a percentage, including split pots.
    pub total: f64,
    /// Percentage of completions where this hand wins the whole pot alone.
    pub scoop: f64,
    /// Percentage of completions with a qualifying low.
    pub low_possible: f64,
    /// Number of completions this hand won the whole pot alone.
    pub scoop_count: u32,
}

impl MultiEquity {
    fn new(game: Game, remaining: usize, exact: bool) -> Self {
        Self {
            eqs: game.equity_types().iter().map(|&t| Equity::new(t)).collect(),
            exact,
            remaining,
            hilo: game.is_hilo(),
            total: 0.0,
            scoop: 0.0,
            low_possible: 0.0,
            scoop_count: 0,
        }
    }

    /// Returns the equity for the given type.
    pub fn equity(&self, eq_type: EquityType) -> Option<&Equity> {
        self.eqs.iter().find(|e| e.eq_type == eq_type)
    }

    /// The main equity, high only or the only low valuation.
    pub fn main(&self) -> &Equity {
        &self.eqs[0]
    }

    /// The hand value with the known cards.
    pub fn current(&self) -> HandValue {
        self.main().current
    }
}

/// Running counters for one equity calculation.
#[derive(Debug)]
pub(crate) struct Tally {
    meqs: Vec<MultiEquity>,
    /// Pot shares won by each hand.
    shares: Vec<f64>,
    /// Scratch lists of high and low winners indices.
    winners: Vec<usize>,
    lo_winners: Vec<usize>,
    hilo: bool,
    lows: u32,
    count: u32,
}

impl Tally {
    /// Creates counters for `hands` hands.
    pub fn new(game: Game, hands: usize, remaining: usize, exact: bool) -> Self {
        Self {
            meqs: (0..hands)
                .map(|_| MultiEquity::new(game, remaining, exact))
                .collect(),
            shares: vec![0.0; hands],
            winners: Vec::with_capacity(hands),
            lo_winners: Vec::with_capacity(hands),
            hilo: game.is_hilo(),
            lows: 0,
            count: 0,
        }
    }

    /// Sets the hand values with the known cards.
    pub fn set_current(&mut self, vals: &[Values]) {
        let (hi_best, hi_count) = best_of(vals, 0);
        let (lo_best, lo_count) = best_of(vals, 1);

        for (meq, v) in self.meqs.iter_mut().zip(vals) {
            for eq in meq.eqs.iter_mut() {
                let (value, best, count) = match eq.eq_type {
                    EquityType::HiloLowHalf => (v[1], lo_best, lo_count),
                    _ => (v[0], hi_best, hi_count),
                };

                eq.current = value;
                if !value.is_none() && value == best {
                    eq.current_win = count == 1;
                    eq.current_tie = count > 1;
                }
            }
        }
    }

    /// Records the values of all hands for one completion.
    ///
    /// The `out` card is the only unknown card of this completion, it is set
    /// when the exact engine deals one card.
    pub fn record(&mut self, vals: &[Values], out: Option<Card>) {
        self.count += 1;

        let hi_best = collect_winners(vals, 0, &mut self.winners);
        let hi_winners = self.winners.len();
        let hi_scooper = (hi_winners == 1).then(|| self.winners[0]);

        // The high only equity is awarded as if no low could qualify.
        award(&mut self.meqs, 0, &self.winners, hi_best, out);

        let lo_best = if self.hilo {
            collect_winners(vals, 1, &mut self.lo_winners)
        } else {
            HandValue::NONE
        };

        if lo_best.is_none() {
            // No low, high takes the whole pot.
            let share = 1.0 / hi_winners as f64;
            for &w in &self.winners {
                self.shares[w] += share;
            }

            if let Some(w) = hi_scooper {
                self.meqs[w].scoop_count += 1;
            }

            return;
        }

        self.lows += 1;
        award(&mut self.meqs, 1, &self.winners, hi_best, out);
        award(&mut self.meqs, 2, &self.lo_winners, lo_best, out);

        let hi_share = 0.5 / hi_winners as f64;
        for &w in &self.winners {
            self.shares[w] += hi_share;
        }

        let lo_share = 0.5 / self.lo_winners.len() as f64;
        for &w in &self.lo_winners {
            self.shares[w] += lo_share;
        }

        if let Some(w) = hi_scooper.filter(|&w| self.lo_winners == [w]) {
            self.meqs[w].scoop_count += 1;
        }
    }

    /// Number of recorded completions.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Converts counts to percentages.
    pub fn finish(mut self) -> Vec<MultiEquity> {
        let count = self.count.max(1) as f64;
        let pct = |n: u32| n as f64 * 100.0 / count;

        let low_possible = pct(self.lows);
        for (meq, share) in self.meqs.iter_mut().zip(&self.shares) {
            meq.total = share * 100.0 / count;
            meq.scoop = pct(meq.scoop_count);
            meq.low_possible = if meq.hilo { low_possible } else { 0.0 };

            for eq in meq.eqs.iter_mut() {
                eq.win = pct(eq.wins);
                eq.tie = pct(eq.ties);
                eq.won_rank = eq.won_rank_count.map(pct);
                eq.outs.sort_unstable();
            }
        }

        self.meqs
    }
}

/// Returns the best value in the given slot and how many hands have it.
fn best_of(vals: &[Values], slot: usize) -> (HandValue, usize) {
    let best = vals.iter().map(|v| v[slot]).max().unwrap_or(HandValue::NONE);
    let count = vals.iter().filter(|v| v[slot] == best).count();
    (best, count)
}

/// Collects the indices of the hands with the best value in the given slot.
fn collect_winners(vals: &[Values], slot: usize, winners: &mut Vec<usize>) -> HandValue {
    let (best, _) = best_of(vals, slot);

    winners.clear();
    if !best.is_none() {
        winners.extend(
            vals.iter()
                .enumerate()
                .filter(|(_, v)| v[slot] == best)
                .map(|(idx, _)| idx),
        );
    }

    best
}

/// Adds a win or a tie to the equity at `eq_idx` of each winner.
fn award(
    meqs: &mut [MultiEquity],
    eq_idx: usize,
    winners: &[usize],
    best: HandValue,
    out: Option<Card>,
) {
    let alone = winners.len() == 1;
    for &w in winners {
        let eq = &mut meqs[w].eqs[eq_idx];
        if alone {
            eq.wins += 1;
            if let Some(card) = out {
                if !eq.current_win {
                    eq.outs.push(card);
                }
            }
        } else {
            eq.ties += 1;
        }

        eq.won_rank_count[best.rank() as usize] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilab_cards::parse_cards;

    fn high(cards: &str) -> Values {
        let hand = parse_cards(cards).unwrap().try_into().unwrap();
        Game::OmahaHiLo.values(&hand)
    }

    #[test]
    fn single_pot() {
        let mut tally = Tally::new(Game::Holdem, 3, 45, true);
        let pair = [high("AcAdKh7s2c")[0], HandValue::NONE];
        let weak = [high("Kc9d7h4s3c")[0], HandValue::NONE];

        // Hand 0 wins, then hands 0 and 1 tie.
        tally.record(&[pair, weak, weak], None);
        tally.record(&[pair, pair, weak], None);

        assert_eq!(tally.count(), 2);
        let meqs = tally.finish();

        assert_eq!(meqs[0].main().wins, 1);
        assert_eq!(meqs[0].main().ties, 1);
        assert_eq!(meqs[0].main().win, 50.0);
        assert_eq!(meqs[0].main().won_rank[HandRank::OnePair as usize], 100.0);
        assert_eq!(meqs[0].total, 75.0);
        assert_eq!(meqs[0].scoop, 50.0);
        assert_eq!(meqs[1].total, 25.0);
        assert_eq!(meqs[1].scoop, 0.0);
        assert_eq!(meqs[2].total, 0.0);

        let total = meqs.iter().map(|m| m.total).sum::<f64>();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hilo_split() {
        let mut tally = Tally::new(Game::OmahaHiLo, 2, 40, true);

        // Hand 0 wins high, hand 1 wins low.
        let h0 = high("KcKdKh9s9c");
        let h1 = high("Ac2d3h4s6c");
        assert!(!h1[1].is_none());
        tally.record(&[h0, h1], None);

        // Hand 0 wins high and low.
        let h0 = high("Ac2d3h4s5c");
        let h1 = high("Kc9d7h4s3c");
        tally.record(&[h0, h1], None);

        // No low, hand 1 wins high.
        let h0 = high("KcQdJh9s2c");
        let h1 = high("AcAdJh9s2c");
        tally.record(&[h0, h1], None);

        let meqs = tally.finish();
        let (m0, m1) = (&meqs[0], &meqs[1]);

        // 1/2 + 1 + 0 and 1/2 + 0 + 1 over 3 pots.
        assert!((m0.total - 50.0).abs() < 1e-9);
        assert!((m1.total - 50.0).abs() < 1e-9);
        assert!((m0.scoop - 100.0 / 3.0).abs() < 1e-9);
        assert!((m1.scoop - 100.0 / 3.0).abs() < 1e-9);
        assert!((m0.low_possible - 200.0 / 3.0).abs() < 1e-9);

        let hi = m0.equity(EquityType::HighOnly).unwrap();
        assert_eq!(hi.wins, 2);
        let hi_half = m0.equity(EquityType::HiloHighHalf).unwrap();
        assert_eq!(hi_half.wins, 2);
        let lo_half = m1.equity(EquityType::HiloLowHalf).unwrap();
        assert_eq!(lo_half.wins, 1);
        assert_eq!(m1.equity(EquityType::HiloHighHalf).unwrap().wins, 0);
    }

    #[test]
    fn scoop_requires_no_ties() {
        let mut tally = Tally::new(Game::OmahaHiLo, 2, 40, true);

        // Both hands have the same low, hand 0 wins high.
        let h0 = high("Ac2d3h4s5c");
        let h1 = high("Ad2c3s4h5d");
        let h1 = [HandValue::NONE, h1[1]];
        tally.record(&[h0, h1], None);

        let meqs = tally.finish();
        assert_eq!(meqs[0].scoop, 0.0);
        assert_eq!(meqs[0].main().wins, 1);
        assert_eq!(meqs[0].eqs[2].ties, 1);
        assert!((meqs[0].total - 75.0).abs() < 1e-9);
        assert!((meqs[1].total - 25.0).abs() < 1e-9);
    }

    #[test]
    fn current_and_outs() {
        let aces = high("AcAdKh7s2c");
        let kings = high("KcKdQh7s2c");
        let trips = high("KcKdKh7s2c");

        let mut tally = Tally::new(Game::Holdem, 2, 44, true);
        tally.set_current(&[aces, kings]);

        let card = parse_cards("Ks").unwrap()[0];
        tally.record(&[aces, trips], Some(card));
        tally.record(&[aces, kings], parse_cards("3d").unwrap().first().copied());

        let meqs = tally.finish();
        assert!(meqs[0].main().current_win);
        assert!(!meqs[1].main().current_win);
        assert_eq!(meqs[0].current(), aces[0]);

        // The leader has no outs, the trailing hand has one.
        assert!(meqs[0].main().outs.is_empty());
        assert_eq!(meqs[1].main().outs, vec![card]);
    }
}
