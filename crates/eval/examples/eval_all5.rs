// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// ...
// Total hands      2598960
// Elapsed:         0.245s
// Hands/sec:       10607999
//
// High Card:       1302540
// One Pair:        1098240
// Two Pairs:       123552
// Three of a Kind: 54912
// Straight:        10200
// Flush:           5108
// Full House:      3744
// Four of a Kind:  624
// Straight Flush:  40
//
// Lows 8 or better: 57344
// ```

use std::time::Instant;

use equilab_eval::*;

#[rustfmt::skip]
fn main() {
    // Evaluate all 2.6M hands, each hand is the p-th combination of the deck.
    let now = Instant::now();
    let mut counts = [0usize; HandRank::COUNT];
    let mut lows = 0usize;

    let deck = Deck::default();
    let total = binomial(deck.count(), 5).unwrap_or(0) as usize;
    let mut hand = [Card::new(Rank::Ace, Suit::Diamonds); 5];

    for p in 0..total {
        kth_combination(5, p, deck.cards(), &mut hand, 0);

        let rank = HandValue::eval(&hand).rank();
        counts[rank as usize] += 1;

        if !HandValue::eval_low8(&hand).is_none() {
            lows += 1;
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for rank in HandRank::ranks() {
        println!("{:<17}{}", format!("{rank}:"), counts[rank as usize]);
    }

    println!("\nLows 8 or better: {lows}");
}
