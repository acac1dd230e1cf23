//! SeaORM adapter for the per-(matchup, step) progress ledger.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::matchup_step_progress;

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
) -> Result<Option<matchup_step_progress::Model>, sea_orm::DbErr> {
    matchup_step_progress::Entity::find()
        .filter(matchup_step_progress::Column::MatchupId.eq(matchup_id))
        .filter(matchup_step_progress::Column::StepId.eq(step_id))
        .one(conn)
        .await
}

pub async fn list_for_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Vec<matchup_step_progress::Model>, sea_orm::DbErr> {
    matchup_step_progress::Entity::find()
        .filter(matchup_step_progress::Column::MatchupId.eq(matchup_id))
        .all(conn)
        .await
}

/// Insert an incomplete row unless one exists, then read it back.
pub async fn get_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
) -> Result<(matchup_step_progress::Model, bool), sea_orm::DbErr> {
    let row = matchup_step_progress::ActiveModel {
        id: NotSet,
        matchup_id: Set(matchup_id),
        step_id: Set(step_id),
        is_completed: Set(false),
        started_at: Set(Some(OffsetDateTime::now_utc())),
        completed_at: Set(None),
        completed_by: Set(None),
        notes: Set(None),
    };

    let rows = matchup_step_progress::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                matchup_step_progress::Column::MatchupId,
                matchup_step_progress::Column::StepId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let model = find(conn, matchup_id, step_id).await?.ok_or_else(|| {
        sea_orm::DbErr::RecordNotFound("matchup_step_progress row not found".to_string())
    })?;

    Ok((model, rows == 1))
}

/// Flip an incomplete row to completed. Returns 0 when it already was.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
    completed_by: Option<i64>,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = matchup_step_progress::Entity::update_many()
        .col_expr(matchup_step_progress::Column::IsCompleted, Expr::value(true))
        .col_expr(matchup_step_progress::Column::CompletedAt, Expr::value(Some(now)))
        .col_expr(
            matchup_step_progress::Column::CompletedBy,
            Expr::value(completed_by),
        )
        .filter(matchup_step_progress::Column::MatchupId.eq(matchup_id))
        .filter(matchup_step_progress::Column::StepId.eq(step_id))
        .filter(matchup_step_progress::Column::IsCompleted.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Clear completion on the (matchup, step) row. Returns rows touched.
pub async fn reset<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = matchup_step_progress::Entity::update_many()
        .col_expr(matchup_step_progress::Column::IsCompleted, Expr::value(false))
        .col_expr(
            matchup_step_progress::Column::CompletedAt,
            Expr::value(Option::<OffsetDateTime>::None),
        )
        .col_expr(
            matchup_step_progress::Column::CompletedBy,
            Expr::value(Option::<i64>::None),
        )
        .filter(matchup_step_progress::Column::MatchupId.eq(matchup_id))
        .filter(matchup_step_progress::Column::StepId.eq(step_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
