// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em odds HTTP server.
//!
//! Exposes the hand evaluator and the odds simulation as JSON endpoints:
//!
//! - `GET /health`
//! - `POST /evaluate` with `{"hole_cards": [..], "board_cards": [..]}`
//! - `POST /odds` with `{"hole_cards": [..], "board_cards": [..], "num_opponents": n}`
//!   and optional `simulations` and `workers`.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod api;
pub mod server;
pub use server::{Config, routes, run};
