// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em odds command line.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, value_parser};
use log::info;
use std::time::Instant;

use holdem_odds_eval::{Card, HandValue, Rank, Simulation, parse_cards};

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates the best hand for 1 to 7 cards.
    Eval {
        /// The cards codes (e.g. AS KD 7c).
        #[clap(required = true, num_args = 1..=7)]
        cards: Vec<String>,
    },
    /// Estimates the odds of a pair of hole cards against random opponents.
    Odds {
        /// The two hole cards codes.
        #[clap(long, num_args = 2, required = true)]
        hole: Vec<String>,
        /// The known board cards codes.
        #[clap(long, num_args = 0..=5)]
        board: Vec<String>,
        /// The number of opponents.
        #[clap(long, short, default_value_t = 1, value_parser = value_parser!(u8).range(1..=9))]
        opponents: u8,
        /// The number of trials.
        #[clap(long, short, default_value_t = 10_000)]
        trials: usize,
        /// The number of parallel workers.
        #[clap(long, short, default_value_t = 4)]
        workers: usize,
        /// Seed for reproducible runs.
        #[clap(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Eval { cards } => eval(&cards),
        Command::Odds {
            hole,
            board,
            opponents,
            trials,
            workers,
            seed,
        } => odds(&hole, &board, opponents as usize, trials, workers, seed),
    }
}

fn eval(codes: &[String]) -> Result<()> {
    let cards = parse_cards(codes).context("Invalid cards")?;
    let value = HandValue::eval(&cards).ok_or_else(|| anyhow!("Unable to evaluate hand"))?;
    println!("{}", describe(&value));
    Ok(())
}

fn odds(
    hole: &[String],
    board: &[String],
    opponents: usize,
    trials: usize,
    workers: usize,
    seed: Option<u64>,
) -> Result<()> {
    let hole = parse_cards(hole).context("Invalid hole cards")?;
    let board = parse_cards(board).context("Invalid board cards")?;

    let Ok(hole) = <[Card; 2]>::try_from(hole) else {
        bail!("Must provide exactly 2 hole cards");
    };

    let mut sim = Simulation::new(hole, &board, opponents)?
        .trials(trials)
        .workers(workers);
    if let Some(seed) = seed {
        sim = sim.seed(seed);
    }

    let now = Instant::now();
    let odds = sim.run();
    info!("Elapsed: {:.3}s", now.elapsed().as_secs_f64());

    println!("Trials: {}", odds.trials);
    println!("Win:    {:6.2}%", odds.win * 100.0);
    println!("Tie:    {:6.2}%", odds.tie * 100.0);
    println!("Loss:   {:6.2}%", odds.loss * 100.0);

    Ok(())
}

/// Formats a hand value with the kickers as ranks.
fn describe(value: &HandValue) -> String {
    let kickers = value
        .kickers()
        .iter()
        .filter_map(|&v| Rank::ranks().nth(v as usize))
        .map(|r| r.to_string())
        .collect::<Vec<_>>();

    if kickers.is_empty() {
        value.label().to_string()
    } else {
        format!("{} ({})", value.label(), kickers.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(codes: &[&str]) -> HandValue {
        HandValue::eval(&parse_cards(codes).unwrap()).unwrap()
    }

    #[test]
    fn describe_hands() {
        assert_eq!(
            describe(&value(&["7D", "7C", "7S", "2H", "2D"])),
            "Full House (7 2)"
        );
        assert_eq!(
            describe(&value(&["AS", "KS", "QS", "JS", "TS", "2D", "3C"])),
            "Royal Flush"
        );
        assert_eq!(describe(&value(&["5C", "4D", "3H", "2S", "AC"])), "Straight (5)");
    }

    #[test]
    fn parse_command_line() {
        let cli = Cli::try_parse_from([
            "holdem-odds",
            "odds",
            "--hole",
            "AS",
            "AH",
            "--board",
            "2C",
            "7D",
            "9H",
            "-o",
            "3",
        ])
        .unwrap();

        let Command::Odds {
            hole,
            board,
            opponents,
            trials,
            workers,
            seed,
        } = cli.command
        else {
            panic!("expected odds command");
        };

        assert_eq!(hole, vec!["AS", "AH"]);
        assert_eq!(board, vec!["2C", "7D", "9H"]);
        assert_eq!(opponents, 3);
        assert_eq!(trials, 10_000);
        assert_eq!(workers, 4);
        assert_eq!(seed, None);

        assert!(Cli::try_parse_from(["holdem-odds", "odds", "--hole", "AS", "AH", "-o", "10"]).is_err());
        assert!(Cli::try_parse_from(["holdem-odds", "eval"]).is_err());
    }
}
