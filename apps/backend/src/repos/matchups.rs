//! Matchup repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::matchups_sea;
use crate::adapters::matchups_sea::{MatchupCreate, MatchupStatusUpdate};
use crate::domain::matchup::{MatchupStatus, StatusTimestamps};
use crate::domain::progression::sibling_team;
use crate::entities::game_matchups::{self, MatchupStatus as DbMatchupStatus};
use crate::errors::domain::DomainError;

/// Matchup domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub id: i64,
    pub game_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub school_id: i64,
    pub created_by: Option<i64>,
    pub status: MatchupStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub scheduled_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Matchup {
    pub fn involves_team(&self, team_id: i64) -> bool {
        team_id == self.team1_id || team_id == self.team2_id
    }

    /// The opposing team, or `None` if `team_id` is not in this matchup.
    pub fn sibling_of(&self, team_id: i64) -> Option<i64> {
        sibling_team(self.team1_id, self.team2_id, team_id)
    }

    pub fn timestamps(&self) -> StatusTimestamps {
        StatusTimestamps {
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

pub async fn create_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchupCreate,
) -> Result<Matchup, DomainError> {
    Ok(Matchup::from(matchups_sea::create_matchup(conn, dto).await?))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Option<Matchup>, DomainError> {
    Ok(matchups_sea::find_by_id(conn, matchup_id)
        .await?
        .map(Matchup::from))
}

pub async fn require_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Matchup, DomainError> {
    find_by_id(conn, matchup_id)
        .await?
        .ok_or_else(|| DomainError::matchup_not_found(matchup_id))
}

/// Persist `status` with its timestamps and return the fresh row.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
    status: MatchupStatus,
    timestamps: StatusTimestamps,
) -> Result<Matchup, DomainError> {
    let rows = matchups_sea::update_status(
        conn,
        MatchupStatusUpdate {
            id: matchup_id,
            status: status.into(),
            started_at: timestamps.started_at,
            completed_at: timestamps.completed_at,
        },
    )
    .await?;

    if rows == 0 {
        return Err(DomainError::matchup_not_found(matchup_id));
    }
    require_matchup(conn, matchup_id).await
}

pub async fn list_for_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Vec<Matchup>, DomainError> {
    let rows = matchups_sea::list_for_school(conn, school_id).await?;
    Ok(rows.into_iter().map(Matchup::from).collect())
}

pub async fn list_managed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: Option<i64>,
    user_id: i64,
) -> Result<Vec<Matchup>, DomainError> {
    let rows = matchups_sea::list_managed(conn, school_id, user_id).await?;
    Ok(rows.into_iter().map(Matchup::from).collect())
}

pub async fn list_for_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<Matchup>, DomainError> {
    let rows = matchups_sea::list_for_teams(conn, team_ids).await?;
    Ok(rows.into_iter().map(Matchup::from).collect())
}

impl From<DbMatchupStatus> for MatchupStatus {
    fn from(status: DbMatchupStatus) -> Self {
        match status {
            DbMatchupStatus::Scheduled => MatchupStatus::Scheduled,
            DbMatchupStatus::InProgress => MatchupStatus::InProgress,
            DbMatchupStatus::Completed => MatchupStatus::Completed,
            DbMatchupStatus::Cancelled => MatchupStatus::Cancelled,
        }
    }
}

impl From<MatchupStatus> for DbMatchupStatus {
    fn from(status: MatchupStatus) -> Self {
        match status {
            MatchupStatus::Scheduled => DbMatchupStatus::Scheduled,
            MatchupStatus::InProgress => DbMatchupStatus::InProgress,
            MatchupStatus::Completed => DbMatchupStatus::Completed,
            MatchupStatus::Cancelled => DbMatchupStatus::Cancelled,
        }
    }
}

impl From<game_matchups::Model> for Matchup {
    fn from(model: game_matchups::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            team1_id: model.team1_id,
            team2_id: model.team2_id,
            school_id: model.school_id,
            created_by: model.created_by,
            status: model.status.into(),
            scheduled_date: model.scheduled_date,
            started_at: model.started_at,
            completed_at: model.completed_at,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
