// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity output.
use serde::Serialize;

use equilab_cards::Card;
use equilab_eval::{Game, HandRank, MultiEquity, Request};

/// Formats cards like "AhKd".
pub fn cards_string(cards: &[Card]) -> String {
    cards.iter().map(|c| c.to_string()).collect()
}

/// JSON output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    game: Game,
    board: String,
    blockers: String,
    exact: bool,
    remaining: usize,
    hands: Vec<HandReport<'a>>,
}

/// JSON output for one hand.
#[derive(Debug, Serialize)]
pub struct HandReport<'a> {
    cards: String,
    current: String,
    outs: String,
    equity: &'a MultiEquity,
}

impl<'a> Report<'a> {
    /// Creates the report for the request hands.
    pub fn new(req: &Request, meqs: &'a [MultiEquity]) -> Self {
        let hands = req
            .holes
            .iter()
            .zip(meqs)
            .map(|(hole, meq)| HandReport {
                cards: cards_string(hole),
                current: meq.current().to_string(),
                outs: cards_string(&meq.main().outs),
                equity: meq,
            })
            .collect();

        Self {
            game: req.game,
            board: cards_string(&req.board),
            blockers: cards_string(&req.blockers),
            exact: meqs.first().is_some_and(|m| m.exact),
            remaining: meqs.first().map(|m| m.remaining).unwrap_or_default(),
            hands,
        }
    }
}

/// Prints a table with one row per hand and equity type.
pub fn print(req: &Request, meqs: &[MultiEquity]) {
    let Some(first) = meqs.first() else {
        return;
    };

    let kind = if first.exact { "exact" } else { "sampled" };
    println!(
        "{} {} board [{}] {} cards left\n",
        req.game,
        kind,
        cards_string(&req.board),
        first.remaining
    );

    println!(
        "{:<12} {:<20} {:>7} {:>7} {:>7}  {}",
        "Hand", "Type", "Equity", "Win", "Tie", "Current"
    );

    for (hole, meq) in req.holes.iter().zip(meqs) {
        let cards = cards_string(hole);
        for (idx, eq) in meq.eqs.iter().enumerate() {
            let name = if idx == 0 { cards.as_str() } else { "" };
            let total = if idx == 0 {
                format!("{:6.2}%", meq.total)
            } else {
                String::new()
            };

            println!(
                "{:<12} {:<20} {:>7} {:>6.2}% {:>6.2}%  {}",
                name,
                eq.eq_type.to_string(),
                total,
                eq.win,
                eq.tie,
                eq.current
            );

            if !eq.outs.is_empty() {
                println!("{:<12} outs {} {}", "", eq.outs.len(), cards_string(&eq.outs));
            }
        }

        if meq.hilo {
            println!(
                "{:<12} scoop {:.2}% low possible {:.2}%",
                "", meq.scoop, meq.low_possible
            );
        }

        let won = HandRank::ranks()
            .rev()
            .filter(|&r| meq.main().won_rank[r as usize] > 0.0)
            .map(|r| format!("{} {:.1}%", r.short_name(), meq.main().won_rank[r as usize]))
            .collect::<Vec<_>>();

        if !won.is_empty() {
            println!("{:<12} won with {}", "", won.join(" "));
        }
    }
}
