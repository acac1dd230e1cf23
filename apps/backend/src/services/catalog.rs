//! Read side of the game catalog: games, ordered steps, instruction chains.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::domain::instructions::walk_chain;
use crate::domain::roles::Audience;
use crate::error::AppError;
use crate::repos::catalog::{self, Game, GameStep};
use crate::repos::instructions::{self, Instruction};

/// A game with its active steps and derived totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameCatalog {
    pub game: Game,
    pub steps: Vec<GameStep>,
    pub total_estimated_duration_minutes: i64,
    pub has_multiple_steps: bool,
}

pub fn total_estimated_duration(steps: &[GameStep]) -> i64 {
    steps
        .iter()
        .filter(|s| s.is_active)
        .map(|s| i64::from(s.estimated_duration_minutes))
        .sum()
}

pub fn has_multiple_steps(steps: &[GameStep]) -> bool {
    steps.iter().filter(|s| s.is_active).count() > 1
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_games<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Game>, AppError> {
        Ok(catalog::list_active_games(conn).await?)
    }

    pub async fn game_catalog<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<GameCatalog, AppError> {
        let game = catalog::require_game(conn, game_id).await?;
        let steps = catalog::active_steps(conn, game_id).await?;
        Ok(GameCatalog {
            total_estimated_duration_minutes: total_estimated_duration(&steps),
            has_multiple_steps: has_multiple_steps(&steps),
            game,
            steps,
        })
    }

    /// Ordered instructions of `step_number` for `audience`.
    pub async fn instruction_chain<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        step_number: i32,
        audience: Audience,
    ) -> Result<Vec<Instruction>, AppError> {
        let step = catalog::require_active_step(conn, game_id, step_number).await?;
        let mut all = instructions::list_for_step(conn, step.id).await?;

        let nodes: Vec<_> = all.iter().map(Instruction::chain_node).collect();
        let order = walk_chain(&nodes, step.id, audience);

        let mut chain = Vec::with_capacity(order.len());
        for id in order {
            if let Some(pos) = all.iter().position(|i| i.id == id) {
                chain.push(all.swap_remove(pos));
            }
        }
        Ok(chain)
    }
}
