// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab command line equity calculator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use log::{error, info};

use equilab_cards::{Card, CardSet, Deck, parse_cards};
use equilab_eval::{Calculator, Config, Game, Request, drawing_hand};

mod report;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    /// Texas Hold'em.
    Holdem,
    /// Omaha high.
    Omaha,
    /// Omaha hi/lo eight-or-better.
    Omaha8,
    /// Five cards draw.
    Draw,
    /// Deuce-to-seven single draw.
    Draw27,
    /// Ace-to-five draw.
    Draw15,
}

impl From<GameArg> for Game {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Holdem => Game::Holdem,
            GameArg::Omaha => Game::Omaha,
            GameArg::Omaha8 => Game::OmahaHiLo,
            GameArg::Draw => Game::FiveCardDraw,
            GameArg::Draw27 => Game::DeuceSevenDraw,
            GameArg::Draw15 => Game::AceFiveDraw,
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// The hands cards, one argument per hand (e.g. AhAd KsKc).
    hands: Vec<String>,
    /// The game type.
    #[clap(long, short, value_enum, default_value_t = GameArg::Holdem)]
    game: GameArg,
    /// The board cards (e.g. Kh7h2d).
    #[clap(long, short, default_value = "")]
    board: String,
    /// Dead cards that are not part of any hand.
    #[clap(long, default_value = "")]
    blockers: String,
    /// Number of cards each draw hand discarded, the equity is computed for
    /// the cards the hand likely kept.
    #[clap(long, short, value_delimiter = ',')]
    discards: Vec<usize>,
    /// Number of sampled boards or draws.
    #[clap(long, short)]
    samples: Option<usize>,
    /// Seed for reproducible sampling.
    #[clap(long)]
    seed: Option<u64>,
    /// Add this many random hands.
    #[clap(long, short, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    random: u8,
    /// Print the equity as JSON.
    #[clap(long)]
    json: bool,
    /// Enable debug logs.
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config {
            seed: self.seed,
            ..Config::default()
        };

        if let Some(samples) = self.samples {
            config.board_samples = samples;
            config.draw_samples = samples;
        }

        config
    }

    fn request(&self) -> Result<Request> {
        let game = Game::from(self.game);
        let board = parse_cards(&self.board)?;
        let blockers = parse_cards(&self.blockers)?;

        let mut holes = self
            .hands
            .iter()
            .map(|h| parse_cards(h))
            .collect::<Result<Vec<_>, _>>()?;

        if !self.discards.is_empty() {
            if game.has_board() {
                bail!("discards are only valid for draw games");
            }

            if self.discards.len() != holes.len() {
                bail!(
                    "got {} discards for {} hands",
                    self.discards.len(),
                    holes.len()
                );
            }

            for (hole, &discards) in holes.iter_mut().zip(&self.discards) {
                *hole = drawing_hand(hole, discards)?;
                info!("Drew {discards} to {}", report::cards_string(hole));
            }
        }

        if self.random > 0 {
            let used = board
                .iter()
                .chain(&blockers)
                .chain(holes.iter().flatten())
                .copied()
                .collect::<CardSet>();
            deal_random(game, self.random as usize, used, &mut holes)?;
        }

        Ok(Request::new(game, holes)
            .with_board(board)
            .with_blockers(blockers))
    }
}

/// Deals `count` hands with the largest number of hole cards for the game.
fn deal_random(
    game: Game,
    count: usize,
    used: CardSet,
    holes: &mut Vec<Vec<Card>>,
) -> Result<()> {
    let mut deck = Deck::new_and_shuffled(&mut rand::rng());
    let size = *game.hole_cards().end();

    for _ in 0..count {
        let mut hole = Vec::with_capacity(size);
        while hole.len() < size {
            match deck.deal() {
                Some(card) if !used.contains(card) => hole.push(card),
                Some(_) => {}
                None => bail!("not enough cards to deal {count} random hands"),
            }
        }

        info!("Dealt {}", report::cards_string(&hole));
        holes.push(hole);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let req = cli.request()?;
    let calc = Calculator::new(cli.config());
    let meqs = calc.equity(req.clone()).await?;

    if cli.json {
        let report = report::Report::new(&req, &meqs);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print(&req, &meqs);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}
