//! SeaORM adapter for instruction chains.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{game_steps, instruction_steps};

pub mod dto;

pub use dto::{InstructionCreate, InstructionUpdate};

pub async fn create_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: InstructionCreate,
) -> Result<instruction_steps::Model, sea_orm::DbErr> {
    instruction_steps::ActiveModel {
        id: NotSet,
        step_id: Set(dto.step_id),
        role: Set(dto.role),
        title: Set(dto.title),
        content: Set(dto.content),
        is_active: Set(dto.is_active),
        next_instruction_id: Set(dto.next_instruction_id),
    }
    .insert(conn)
    .await
}

pub async fn find_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
) -> Result<Option<instruction_steps::Model>, sea_orm::DbErr> {
    instruction_steps::Entity::find_by_id(instruction_id)
        .one(conn)
        .await
}

/// Apply the set fields of `dto`; unset fields keep their value.
pub async fn update_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction: instruction_steps::Model,
    dto: InstructionUpdate,
) -> Result<instruction_steps::Model, sea_orm::DbErr> {
    let mut active: instruction_steps::ActiveModel = instruction.into();
    if let Some(role) = dto.role {
        active.role = Set(role);
    }
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(content) = dto.content {
        active.content = Set(content);
    }
    if let Some(is_active) = dto.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(next) = dto.next_instruction_id {
        active.next_instruction_id = Set(next);
    }
    active.update(conn).await
}

/// Delete one instruction; links into it are nulled by `ON DELETE SET NULL`.
pub async fn delete_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = instruction_steps::Entity::delete_by_id(instruction_id)
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Point `instruction_id` at `next_id` (or clear the link).
pub async fn set_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
    next_id: Option<i64>,
) -> Result<u64, sea_orm::DbErr> {
    let result = instruction_steps::Entity::update_many()
        .col_expr(instruction_steps::Column::NextInstructionId, Expr::value(next_id))
        .filter(instruction_steps::Column::Id.eq(instruction_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Every instruction attached to `step_id`, all roles, active or not.
pub async fn list_for_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    step_id: i64,
) -> Result<Vec<instruction_steps::Model>, sea_orm::DbErr> {
    instruction_steps::Entity::find()
        .filter(instruction_steps::Column::StepId.eq(step_id))
        .order_by_asc(instruction_steps::Column::Id)
        .all(conn)
        .await
}

/// Active instructions paired with the step they hang off.
pub async fn list_active_with_steps<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(instruction_steps::Model, game_steps::Model)>, sea_orm::DbErr> {
    let rows = instruction_steps::Entity::find()
        .filter(instruction_steps::Column::IsActive.eq(true))
        .find_also_related(game_steps::Entity)
        .order_by_asc(instruction_steps::Column::StepId)
        .order_by_asc(instruction_steps::Column::Id)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(instruction, step)| step.map(|step| (instruction, step)))
        .collect())
}
