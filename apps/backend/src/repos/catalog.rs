//! Games and their ordered step definitions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::catalog_sea;
use crate::adapters::catalog_sea::{GameCreate, StepCreate};
use crate::entities::{ai_games, game_steps};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// One step definition of a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStep {
    pub id: i64,
    pub game_id: i64,
    pub step_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub url_pattern: Option<String>,
    pub estimated_duration_minutes: i32,
    pub requires_validation: bool,
    pub is_active: bool,
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<Game, DomainError> {
    Ok(Game::from(catalog_sea::create_game(conn, dto).await?))
}

pub async fn create_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StepCreate,
) -> Result<GameStep, DomainError> {
    Ok(GameStep::from(catalog_sea::create_step(conn, dto).await?))
}

pub async fn find_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    Ok(catalog_sea::find_game(conn, game_id).await?.map(Game::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_game(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub async fn list_active_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Game>, DomainError> {
    let games = catalog_sea::list_active_games(conn).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn active_steps<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<GameStep>, DomainError> {
    let steps = catalog_sea::active_steps(conn, game_id).await?;
    Ok(steps.into_iter().map(GameStep::from).collect())
}

pub async fn find_active_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    step_number: i32,
) -> Result<Option<GameStep>, DomainError> {
    let step = catalog_sea::find_active_step(conn, game_id, step_number).await?;
    Ok(step.map(GameStep::from))
}

/// Active step `step_number` of `game_id`, or `NotFound(Step)`.
pub async fn require_active_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    step_number: i32,
) -> Result<GameStep, DomainError> {
    find_active_step(conn, game_id, step_number)
        .await?
        .ok_or_else(|| DomainError::step_not_found(game_id, step_number))
}

/// Step `step_number` of `game_id` whether or not it is active.
pub async fn require_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    step_number: i32,
) -> Result<GameStep, DomainError> {
    catalog_sea::find_step(conn, game_id, step_number)
        .await?
        .map(GameStep::from)
        .ok_or_else(|| DomainError::step_not_found(game_id, step_number))
}

pub async fn set_requires_validation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    step_id: i64,
    requires_validation: bool,
) -> Result<(), DomainError> {
    catalog_sea::set_requires_validation(conn, step_id, requires_validation).await?;
    Ok(())
}

impl From<ai_games::Model> for Game {
    fn from(model: ai_games::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
        }
    }
}

impl From<game_steps::Model> for GameStep {
    fn from(model: game_steps::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            step_number: model.step_number,
            title: model.title,
            description: model.description,
            url_pattern: model.url_pattern,
            estimated_duration_minutes: model.estimated_duration_minutes,
            requires_validation: model.requires_validation,
            is_active: model.is_active,
        }
    }
}
