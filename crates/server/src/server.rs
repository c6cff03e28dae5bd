// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em odds server entry point.
use anyhow::{Result, anyhow};
use log::info;
use std::net::SocketAddr;
use tokio::signal;
use warp::{Filter, Rejection, Reply};

use holdem_odds_eval::Simulation;

use crate::api::{self, Defaults, OddsRequest};

/// Maximum request body size.
const MAX_BODY_SIZE: u64 = 64 * 1024;

/// Server config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The server listening address.
    pub address: String,
    /// The server listening port.
    pub port: u16,
    /// Trials for requests that do not set them.
    pub trials: usize,
    /// Workers for requests that do not set them.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8001,
            trials: Simulation::DEFAULT_TRIALS,
            workers: Simulation::DEFAULT_WORKERS,
        }
    }
}

/// Server entry point, runs until ctrl-c.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.address, config.port)
        .parse::<SocketAddr>()
        .map_err(|e| anyhow!("Invalid listening address {}: {e}", config.address))?;

    info!(
        "Starting server listening on {addr} trials={} workers={}",
        config.trials, config.workers
    );

    let shutdown_signal = async {
        let _ = signal::ctrl_c().await;
        info!("Received shutdown signal...");
    };

    let (addr, server) = warp::serve(routes(config))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal)
        .map_err(|e| anyhow!("Tcp listener bind error: {e}"))?;

    info!("Listening on http://{addr}");
    server.await;

    Ok(())
}

/// The server routes.
pub fn routes(config: Config) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let defaults = Defaults {
        trials: config.trials,
        workers: config.workers,
    };

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(api::health);

    let evaluate = warp::path("evaluate")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::json())
        .map(api::evaluate);

    let odds = warp::path("odds")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::json())
        .then(move |req: OddsRequest| api::odds(req, defaults));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["Origin", "Content-Type", "Accept"]);

    health
        .or(evaluate)
        .unify()
        .or(odds)
        .unify()
        .recover(api::handle_rejection)
        .with(cors)
        .with(warp::log("holdem_odds_server::api"))
}
