//! SeaORM adapter for instruction feedback, one row per (instruction, user).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::instruction_feedback;

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
    user_id: i64,
) -> Result<Option<instruction_feedback::Model>, sea_orm::DbErr> {
    instruction_feedback::Entity::find()
        .filter(instruction_feedback::Column::InstructionId.eq(instruction_id))
        .filter(instruction_feedback::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Insert or overwrite the user's vote; the flag is true on insert.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
    user_id: i64,
    is_helpful: bool,
    comment: Option<String>,
) -> Result<(instruction_feedback::Model, bool), sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();

    if let Some(existing) = find_for_user(conn, instruction_id, user_id).await? {
        let mut active: instruction_feedback::ActiveModel = existing.into();
        active.is_helpful = Set(is_helpful);
        active.comment = Set(comment);
        active.updated_at = Set(now);
        return Ok((active.update(conn).await?, false));
    }

    let created = instruction_feedback::ActiveModel {
        id: NotSet,
        instruction_id: Set(instruction_id),
        user_id: Set(user_id),
        is_helpful: Set(is_helpful),
        comment: Set(comment),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;
    Ok((created, true))
}

/// Feedback rows for the given instructions, newest first.
pub async fn list_for_instructions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_ids: &[i64],
) -> Result<Vec<instruction_feedback::Model>, sea_orm::DbErr> {
    instruction_feedback::Entity::find()
        .filter(instruction_feedback::Column::InstructionId.is_in(instruction_ids.iter().copied()))
        .order_by_desc(instruction_feedback::Column::CreatedAt)
        .order_by_desc(instruction_feedback::Column::Id)
        .all(conn)
        .await
}

pub async fn count_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    instruction_feedback::Entity::find()
        .filter(instruction_feedback::Column::CreatedAt.gte(cutoff))
        .count(conn)
        .await
}
