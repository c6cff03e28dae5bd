// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Requests handlers and wire types.
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use thiserror::Error;
use warp::{
    Rejection, Reply,
    filters::body::BodyDeserializeError,
    http::StatusCode,
    reject::{MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType},
    reply::{self, Response},
};

use holdem_odds_eval::{
    Card, HandValue, OddsError, ParseCardError, Simulation, has_duplicates, parse_cards,
};

/// Opponents range accepted by the odds endpoint.
const OPPONENTS: std::ops::RangeInclusive<i64> = 1..=9;

/// Maximum number of workers for a single simulation.
pub const MAX_WORKERS: usize = 256;

/// Request for evaluating a hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The player hole cards codes.
    pub hole_cards: Vec<String>,
    /// The board cards codes.
    pub board_cards: Vec<String>,
}

/// The evaluated hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// The hand category name.
    pub hand: String,
    /// The hand category strength, 1 for high card to 10 for royal flush.
    pub rank: u8,
    /// The hand kickers from the most significant.
    pub kickers: Vec<u8>,
}

/// Request for computing odds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsRequest {
    /// The player hole cards codes.
    pub hole_cards: Vec<String>,
    /// The known board cards codes.
    pub board_cards: Vec<String>,
    /// The number of opponents, 1 to 9.
    pub num_opponents: i64,
    /// The number of trials, the server default if missing or not positive.
    #[serde(default)]
    pub simulations: Option<i64>,
    /// The number of workers, the server default if missing or not positive.
    #[serde(default)]
    pub workers: Option<i64>,
}

/// The computed odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsResponse {
    /// Probability of winning.
    pub win: f64,
    /// Probability of tying.
    pub tie: f64,
    /// Probability of losing.
    pub loss: f64,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always ok.
    pub status: String,
    /// The service name.
    pub service: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error message.
    pub error: String,
}

/// Simulation defaults for requests without trials or workers.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    /// The default number of trials.
    pub trials: usize,
    /// The default number of workers.
    pub workers: usize,
}

/// Errors returned to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A hole card code is invalid.
    #[error("Invalid hole cards: {0}")]
    HoleCards(ParseCardError),
    /// A board card code is invalid.
    #[error("Invalid board cards: {0}")]
    BoardCards(ParseCardError),
    /// Wrong number of hole cards.
    #[error("Must provide exactly 2 hole cards")]
    HoleCardsCount,
    /// Too many board cards.
    #[error("Board cannot have more than 5 cards")]
    BoardCardsCount,
    /// Opponents outside the accepted range.
    #[error("Number of opponents must be between 1 and 9")]
    Opponents,
    /// The same card was given more than once.
    #[error("Duplicate cards")]
    DuplicateCards,
    /// The simulation cannot be dealt.
    #[error("Invalid simulation: {0}")]
    Odds(#[from] OddsError),
    /// There are no cards to evaluate.
    #[error("Unable to evaluate hand")]
    NoCards,
    /// The simulation task failed.
    #[error("Simulation failed: {0}")]
    Simulation(String),
}

impl ApiError {
    /// The HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoCards | ApiError::Simulation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        error_reply(self.status(), self.to_string())
    }
}

fn error_reply(status: StatusCode, error: String) -> Response {
    reply::with_status(reply::json(&ErrorResponse { error }), status).into_response()
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(body) => reply::json(&body).into_response(),
        Err(e) => {
            debug!("Request failed: {e}");
            e.into_response()
        }
    }
}

/// Health check handler.
pub fn health() -> Response {
    reply::json(&HealthResponse {
        status: "ok".to_string(),
        service: "holdem-odds".to_string(),
    })
    .into_response()
}

/// Evaluates the best hand from the hole and board cards.
pub fn evaluate(req: EvaluateRequest) -> Response {
    respond(evaluate_hand(&req))
}

fn evaluate_hand(req: &EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
    let mut cards = parse_cards(&req.hole_cards).map_err(ApiError::HoleCards)?;
    let board = parse_cards(&req.board_cards).map_err(ApiError::BoardCards)?;
    cards.extend(board);

    if has_duplicates(&cards) {
        return Err(ApiError::DuplicateCards);
    }

    let value = HandValue::eval(&cards).ok_or(ApiError::NoCards)?;
    Ok(EvaluateResponse {
        hand: value.label().to_string(),
        rank: value.category().ordinal(),
        kickers: value.kickers().to_vec(),
    })
}

/// Runs a simulation on the blocking pool and returns the odds.
pub async fn odds(req: OddsRequest, defaults: Defaults) -> Response {
    respond(simulate(req, defaults).await)
}

async fn simulate(req: OddsRequest, defaults: Defaults) -> Result<OddsResponse, ApiError> {
    let hole = parse_cards(&req.hole_cards).map_err(ApiError::HoleCards)?;
    let board = parse_cards(&req.board_cards).map_err(ApiError::BoardCards)?;

    let hole: [Card; 2] = hole.try_into().map_err(|_| ApiError::HoleCardsCount)?;

    if board.len() > Simulation::BOARD_SIZE {
        return Err(ApiError::BoardCardsCount);
    }

    if !OPPONENTS.contains(&req.num_opponents) {
        return Err(ApiError::Opponents);
    }

    let trials = positive_or(req.simulations, defaults.trials);
    let workers = request_workers(req.workers, defaults.workers);

    let sim = Simulation::new(hole, &board, req.num_opponents as usize)?
        .trials(trials)
        .workers(workers);

    let odds = tokio::task::spawn_blocking(move || sim.run())
        .await
        .map_err(|e| {
            error!("Simulation task error: {e}");
            ApiError::Simulation(e.to_string())
        })?;

    Ok(OddsResponse {
        win: odds.win,
        tie: odds.tie,
        loss: odds.loss,
    })
}

fn request_workers(value: Option<i64>, default: usize) -> usize {
    positive_or(value, default).min(MAX_WORKERS)
}

fn positive_or(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(v) if v > 0 => v as usize,
        _ => default,
    }
}

/// Converts rejections to JSON error responses.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request: {e}"))
    } else if err.find::<UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Invalid request: expected a JSON body".to_string(),
        )
    } else if err.find::<PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Invalid request: body too large".to_string(),
        )
    } else if err.find::<MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        error!("Unhandled rejection: {err:?}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(error_reply(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values() {
        assert_eq!(positive_or(None, 4), 4);
        assert_eq!(positive_or(Some(0), 4), 4);
        assert_eq!(positive_or(Some(-3), 4), 4);
        assert_eq!(positive_or(Some(8), 4), 8);
    }

    #[tokio::test]
    async fn workers_are_capped() {
        let defaults = Defaults {
            trials: 1_000,
            workers: 4,
        };

        let req = OddsRequest {
            hole_cards: vec!["QS".into(), "QD".into()],
            board_cards: vec![],
            num_opponents: 2,
            simulations: Some(500),
            workers: Some(100_000),
        };

        let res = simulate(req, defaults).await.unwrap();
        assert!((res.win + res.tie + res.loss - 1.0).abs() < 1e-9);
        assert_eq!(request_workers(Some(100_000), 4), MAX_WORKERS);
        assert_eq!(request_workers(Some(8), 4), 8);
        assert_eq!(request_workers(None, 4), 4);
    }

    #[test]
    fn error_status() {
        assert_eq!(ApiError::HoleCardsCount.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Opponents.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Odds(OddsError::DuplicateCards).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoCards.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn evaluate_request() {
        let req = EvaluateRequest {
            hole_cards: vec!["7d".into(), "7c".into()],
            board_cards: vec!["7s".into(), "2h".into(), "2d".into()],
        };

        let res = evaluate_hand(&req).unwrap();
        assert_eq!(res.hand, "Full House");
        assert_eq!(res.rank, 7);
        assert_eq!(res.kickers, vec![5, 0]);

        let req = EvaluateRequest {
            hole_cards: vec!["7d".into(), "7d".into()],
            board_cards: vec![],
        };
        assert!(matches!(evaluate_hand(&req), Err(ApiError::DuplicateCards)));
    }
}
