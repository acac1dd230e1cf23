//! Positive integer ids taken from the route path.
//!
//! Existence is checked by the handler inside its transaction; these only
//! reject malformed values with a 400 before any database work.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::Serialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

fn positive_param(req: &HttpRequest, name: &str, code: ErrorCode) -> Result<i64, AppError> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| AppError::bad_request(code, format!("Missing {name} parameter")))?;

    let value = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(code, format!("Invalid {name}: {raw}")))?;

    if value <= 0 {
        return Err(AppError::bad_request(
            code,
            format!("{name} must be positive, got: {value}"),
        ));
    }
    Ok(value)
}

/// `{matchup_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchupId(pub i64);

impl FromRequest for MatchupId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_param(req, "matchup_id", ErrorCode::InvalidMatchupId).map(MatchupId))
    }
}

/// `{game_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameId(pub i64);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_param(req, "game_id", ErrorCode::InvalidGameId).map(GameId))
    }
}

/// `{team_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamId(pub i64);

impl FromRequest for TeamId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_param(req, "team_id", ErrorCode::InvalidTeamId).map(TeamId))
    }
}

/// `{user_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserId(pub i64);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_param(req, "user_id", ErrorCode::InvalidUserId).map(UserId))
    }
}

/// `{instruction_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstructionId(pub i64);

impl FromRequest for InstructionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            positive_param(req, "instruction_id", ErrorCode::InvalidInstructionId)
                .map(InstructionId),
        )
    }
}

/// `{step_number}` path segment. Step numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepNumber(pub i32);

impl FromRequest for StepNumber {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            positive_param(req, "step_number", ErrorCode::InvalidStepNumber).and_then(|n| {
                i32::try_from(n).map(StepNumber).map_err(|_| {
                    AppError::bad_request(
                        ErrorCode::InvalidStepNumber,
                        format!("step_number out of range: {n}"),
                    )
                })
            }),
        )
    }
}
