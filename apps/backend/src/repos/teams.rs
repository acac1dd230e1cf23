use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::teams_sea;
use crate::adapters::teams_sea::{TeamCreate, TeamUpdate};
use crate::entities::team_memberships::{self, MembershipRole};
use crate::entities::{teams, users};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_by: Option<i64>,
}

/// One row of a team roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub user_id: i64,
    pub username: String,
    pub role: MembershipRole,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TeamCreate,
) -> Result<Team, DomainError> {
    Ok(Team::from(teams_sea::create_team(conn, dto).await?))
}

pub async fn find_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    Ok(teams_sea::find_team(conn, team_id).await?.map(Team::from))
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    find_team(conn, team_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
    })
}

/// An active team, or `NotFound(Team)`; deactivated teams are hidden.
pub async fn require_active_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    match find_team(conn, team_id).await? {
        Some(team) if team.is_active => Ok(team),
        _ => Err(DomainError::not_found(
            NotFoundKind::Team,
            format!("Team {team_id} not found"),
        )),
    }
}

pub async fn list_active_for_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Vec<Team>, DomainError> {
    let rows = teams_sea::list_active_for_school(conn, school_id).await?;
    Ok(rows.into_iter().map(Team::from).collect())
}

pub async fn update_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    dto: TeamUpdate,
) -> Result<Team, DomainError> {
    let model = teams_sea::find_team(conn, team_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
    })?;
    Ok(Team::from(teams_sea::update_team(conn, model, dto).await?))
}

pub async fn delete_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<(), DomainError> {
    if teams_sea::delete_team(conn, team_id).await? == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Team,
            format!("Team {team_id} not found"),
        ));
    }
    Ok(())
}

pub async fn add_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
    role: MembershipRole,
) -> Result<(), DomainError> {
    teams_sea::add_member(conn, team_id, user_id, role).await?;
    Ok(())
}

pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(teams_sea::is_member(conn, team_id, user_id).await?)
}

pub async fn team_ids_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(teams_sea::team_ids_for_user(conn, user_id).await?)
}

/// Remove a membership, or `NotFound(Membership)` when there was none.
pub async fn remove_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<(), DomainError> {
    if teams_sea::remove_member(conn, team_id, user_id).await? == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Membership,
            format!("User {user_id} is not a member of team {team_id}"),
        ));
    }
    Ok(())
}

pub async fn list_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<TeamMember>, DomainError> {
    let rows = teams_sea::list_members(conn, team_id).await?;
    Ok(rows.into_iter().map(TeamMember::from).collect())
}

impl From<(team_memberships::Model, users::Model)> for TeamMember {
    fn from((membership, user): (team_memberships::Model, users::Model)) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Self {
            id: model.id,
            school_id: model.school_id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_by: model.created_by,
        }
    }
}
