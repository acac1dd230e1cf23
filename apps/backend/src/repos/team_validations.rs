//! Team validation ledger: one row per (matchup, team, step).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::team_validations_sea;
use crate::entities::team_step_validations;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamValidation {
    pub id: i64,
    pub matchup_id: i64,
    pub team_id: i64,
    pub step_id: i64,
    pub is_validated: bool,
    pub validated_by: Option<i64>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub validated_at: Option<OffsetDateTime>,
    pub notes: Option<String>,
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    team_id: i64,
    step_id: i64,
) -> Result<Option<TeamValidation>, DomainError> {
    let row = team_validations_sea::find(conn, matchup_id, team_id, step_id).await?;
    Ok(row.map(TeamValidation::from))
}

pub async fn list_for_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Vec<TeamValidation>, DomainError> {
    let rows = team_validations_sea::list_for_matchup(conn, matchup_id).await?;
    Ok(rows.into_iter().map(TeamValidation::from).collect())
}

pub async fn get_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    team_id: i64,
    step_id: i64,
) -> Result<TeamValidation, DomainError> {
    let (row, _) = team_validations_sea::get_or_create(conn, matchup_id, team_id, step_id).await?;
    Ok(TeamValidation::from(row))
}

/// True when this call flipped the row; false when it was already validated.
pub async fn mark_validated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    team_id: i64,
    step_id: i64,
    validated_by: Option<i64>,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let rows = team_validations_sea::mark_validated(
        conn,
        matchup_id,
        team_id,
        step_id,
        validated_by,
        now,
    )
    .await?;
    Ok(rows > 0)
}

/// Number of rows reset.
pub async fn reset<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
    team_id: Option<i64>,
) -> Result<u64, DomainError> {
    Ok(team_validations_sea::reset(conn, matchup_id, step_id, team_id).await?)
}

impl From<team_step_validations::Model> for TeamValidation {
    fn from(model: team_step_validations::Model) -> Self {
        Self {
            id: model.id,
            matchup_id: model.matchup_id,
            team_id: model.team_id,
            step_id: model.step_id,
            is_validated: model.is_validated,
            validated_by: model.validated_by,
            validated_at: model.validated_at,
            notes: model.notes,
        }
    }
}
