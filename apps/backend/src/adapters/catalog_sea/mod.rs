//! SeaORM adapter for games and their ordered step definitions.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{ai_games, game_steps};

pub mod dto;

pub use dto::{GameCreate, StepCreate};

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<ai_games::Model, sea_orm::DbErr> {
    ai_games::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        is_active: Set(dto.is_active),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn create_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StepCreate,
) -> Result<game_steps::Model, sea_orm::DbErr> {
    game_steps::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        step_number: Set(dto.step_number),
        title: Set(dto.title),
        description: Set(dto.description),
        url_pattern: Set(dto.url_pattern),
        estimated_duration_minutes: Set(dto.estimated_duration_minutes),
        requires_validation: Set(dto.requires_validation),
        is_active: Set(dto.is_active),
    }
    .insert(conn)
    .await
}

pub async fn find_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<ai_games::Model>, sea_orm::DbErr> {
    ai_games::Entity::find_by_id(game_id).one(conn).await
}

pub async fn list_active_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ai_games::Model>, sea_orm::DbErr> {
    ai_games::Entity::find()
        .filter(ai_games::Column::IsActive.eq(true))
        .order_by_asc(ai_games::Column::Name)
        .order_by_asc(ai_games::Column::Id)
        .all(conn)
        .await
}

/// Active steps of `game_id` ordered by step number.
pub async fn active_steps<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_steps::Model>, sea_orm::DbErr> {
    game_steps::Entity::find()
        .filter(game_steps::Column::GameId.eq(game_id))
        .filter(game_steps::Column::IsActive.eq(true))
        .order_by_asc(game_steps::Column::StepNumber)
        .all(conn)
        .await
}

pub async fn find_active_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    step_number: i32,
) -> Result<Option<game_steps::Model>, sea_orm::DbErr> {
    game_steps::Entity::find()
        .filter(game_steps::Column::GameId.eq(game_id))
        .filter(game_steps::Column::StepNumber.eq(step_number))
        .filter(game_steps::Column::IsActive.eq(true))
        .one(conn)
        .await
}

/// Step `step_number` of `game_id`, active or not.
pub async fn find_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    step_number: i32,
) -> Result<Option<game_steps::Model>, sea_orm::DbErr> {
    game_steps::Entity::find()
        .filter(game_steps::Column::GameId.eq(game_id))
        .filter(game_steps::Column::StepNumber.eq(step_number))
        .one(conn)
        .await
}

pub async fn set_requires_validation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    step_id: i64,
    requires_validation: bool,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_steps::Entity::update_many()
        .col_expr(
            game_steps::Column::RequiresValidation,
            Expr::value(requires_validation),
        )
        .filter(game_steps::Column::Id.eq(step_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
