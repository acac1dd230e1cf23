//! Step progress ledger: one row per (matchup, step).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::step_progress_sea;
use crate::domain::matchup::duration_minutes;
use crate::entities::matchup_step_progress;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepProgress {
    pub id: i64,
    pub matchup_id: i64,
    pub step_id: i64,
    pub is_completed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    pub completed_by: Option<i64>,
    pub notes: Option<String>,
}

impl StepProgress {
    /// Minutes between start and completion; `None` until both are set.
    pub fn duration_minutes(&self) -> Option<i64> {
        let completed_at = self.completed_at?;
        duration_minutes(self.started_at, Some(completed_at), completed_at)
    }
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
) -> Result<Option<StepProgress>, DomainError> {
    let row = step_progress_sea::find(conn, matchup_id, step_id).await?;
    Ok(row.map(StepProgress::from))
}

pub async fn list_for_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Vec<StepProgress>, DomainError> {
    let rows = step_progress_sea::list_for_matchup(conn, matchup_id).await?;
    Ok(rows.into_iter().map(StepProgress::from).collect())
}

pub async fn get_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
) -> Result<StepProgress, DomainError> {
    let (row, _) = step_progress_sea::get_or_create(conn, matchup_id, step_id).await?;
    Ok(StepProgress::from(row))
}

/// True when this call flipped the row; false when it was already completed.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
    completed_by: Option<i64>,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let rows =
        step_progress_sea::mark_completed(conn, matchup_id, step_id, completed_by, now).await?;
    Ok(rows > 0)
}

/// True when a row existed and was reset.
pub async fn reset<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    step_id: i64,
) -> Result<bool, DomainError> {
    Ok(step_progress_sea::reset(conn, matchup_id, step_id).await? > 0)
}

impl From<matchup_step_progress::Model> for StepProgress {
    fn from(model: matchup_step_progress::Model) -> Self {
        Self {
            id: model.id,
            matchup_id: model.matchup_id,
            step_id: model.step_id,
            is_completed: model.is_completed,
            started_at: model.started_at,
            completed_at: model.completed_at,
            completed_by: model.completed_by,
            notes: model.notes,
        }
    }
}
