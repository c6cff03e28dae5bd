// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example chart -- --opponents 2
// ```
use clap::{Parser, value_parser};
use std::time::Instant;

use holdem_odds_eval::*;

fn separator() {
    print!("|");
    for _ in 0..13 {
        print!("-----|");
    }
    println!();
}

#[derive(Debug, Parser)]
struct Cli {
    /// The number of opposing players.
    #[clap(long, short, default_value_t = 1, value_parser = value_parser!(u8).range(1..=9))]
    opponents: u8,
    /// The number of trials for each starting hand.
    #[clap(long, short, default_value_t = 20_000)]
    trials: usize,
    /// The number of parallel workers.
    #[clap(long, short, default_value_t = 4)]
    workers: usize,
}

fn main() -> Result<(), OddsError> {
    let cli = Cli::parse();

    separator();

    let now = Instant::now();

    for r1 in Rank::ranks().rev() {
        let mut labels = Vec::with_capacity(13);
        let mut probs = Vec::with_capacity(13);

        for r2 in Rank::ranks().rev() {
            let (c1, c2) = if r1 <= r2 {
                // Offsuit or pair
                (Card::new(r2, Suit::Hearts), Card::new(r1, Suit::Spades))
            } else {
                // Suited cards
                (Card::new(r1, Suit::Hearts), Card::new(r2, Suit::Hearts))
            };

            if c1.rank() == c2.rank() {
                labels.push(format!("{}{} ", c1.rank(), c2.rank()));
            } else if c1.suit() == c2.suit() {
                labels.push(format!("{}{}s", c1.rank(), c2.rank()));
            } else {
                labels.push(format!("{}{}o", c1.rank(), c2.rank()));
            }

            let odds = Simulation::new([c1, c2], &[], cli.opponents as usize)?
                .trials(cli.trials)
                .workers(cli.workers)
                .run();
            probs.push(odds.win * 100.0);
        }

        print!("|");
        for label in labels {
            print!(" {label} |");
        }

        println!();

        print!("|");
        for prob in &probs {
            print!(" {:2.0}% |", prob.round());
        }
        println!();

        separator();
    }

    println!("Elapsed: {:.3}s", now.elapsed().as_secs_f64());

    Ok(())
}
