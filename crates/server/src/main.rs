// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use holdem_odds_server::{api, server};
use log::error;

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "0.0.0.0")]
    address: String,
    /// The server listening port.
    #[clap(long, short, env = "PORT", default_value_t = 8001)]
    port: u16,
    /// Default number of trials for odds requests.
    #[clap(long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
    trials: u32,
    /// Default number of workers for odds requests.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=api::MAX_WORKERS as i64))]
    workers: u16,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = holdem_odds_server::Config {
        address: cli.address,
        port: cli.port,
        trials: cli.trials as usize,
        workers: cli.workers as usize,
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
    }
}
