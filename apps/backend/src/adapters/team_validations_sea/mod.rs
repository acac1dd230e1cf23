//! SeaORM adapter for the per-(matchup, team, step) validation ledger.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::team_step_validations;

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    team_id: i64,
    step_id: i64,
) -> Result<Option<team_step_validations::Model>, sea_orm::DbErr> {
    team_step_validations::Entity::find()
        .filter(team_step_validations::Column::MatchupId.eq(matchup_id))
        .filter(team_step_validations::Column::TeamId.eq(team_id))
        .filter(team_step_validations::Column::StepId.eq(step_id))
        .one(conn)
        .await
}

pub async fn list_for_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Vec<team_step_validations::Model>, sea_orm::DbErr> {
    team_step_validations::Entity::find()
        .filter(team_step_validations::Column::MatchupId.eq(matchup_id))
        .all(conn)
        .await
}

pub async fn get_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    team_id: i64,
    step_id: i64,
) -> Result<(team_step_validations::Model, bool), sea_orm::DbErr> {
    let row = team_step_validations::ActiveModel {
        id: NotSet,
        matchup_id: Set(matchup_id),
        team_id: Set(team_id),
        step_id: Set(step_id),
        is_validated: Set(false),
        validated_by: Set(None),
        validated_at: Set(None),
        notes: Set(None),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    let rows = team_step_validations::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                team_step_validations::Column::MatchupId,
                team_step_validations::Column::TeamId,
                team_step_validations::Column::StepId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let model = find(conn, matchup_id, team_id, step_id)
        .await?
        .ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound("team_step_validations row not found".to_string())
        })?;

    Ok((model, rows == 1))
}

/// Flip an unvalidated row to validated. Returns 0 when it already was.
pub async fn mark_validated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    team_id: i64,
    step_id: i64,
    validated_by: Option<i64>,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = team_step_validations::Entity::update_many()
        .col_expr(team_step_validations::Column::IsValidated, Expr::value(true))
        .col_expr(
            team_step_validations::Column::ValidatedBy,
            Expr::value(validated_by),
        )
        .col_expr(team_step_validations::Column::ValidatedAt, Expr::value(Some(now)))
        .filter(team_step_validations::Column::MatchupId.eq(matchup_id))
        .filter(team_step_validations::Column::TeamId.eq(team_id))
        .filter(team_step_validations::Column::StepId.eq(step_id))
        .filter(team_step_validations::Column::IsValidated.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Clear validation for (matchup, step), optionally one team only.
pub async fn reset<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
    team_id: Option<i64>,
) -> Result<u64, sea_orm::DbErr> {
    let mut query = team_step_validations::Entity::update_many()
        .col_expr(team_step_validations::Column::IsValidated, Expr::value(false))
        .col_expr(
            team_step_validations::Column::ValidatedBy,
            Expr::value(Option::<i64>::None),
        )
        .col_expr(
            team_step_validations::Column::ValidatedAt,
            Expr::value(Option::<OffsetDateTime>::None),
        )
        .filter(team_step_validations::Column::MatchupId.eq(matchup_id))
        .filter(team_step_validations::Column::StepId.eq(step_id));

    if let Some(team_id) = team_id {
        query = query.filter(team_step_validations::Column::TeamId.eq(team_id));
    }

    Ok(query.exec(conn).await?.rows_affected)
}
