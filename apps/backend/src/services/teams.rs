//! Team rosters managed by the staff of a school.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::adapters::teams_sea::{TeamCreate, TeamUpdate};
use crate::domain::roles::{Actor, Role};
use crate::entities::team_memberships::MembershipRole;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::teams::{self, Team, TeamMember};
use crate::repos::users;
use crate::services::access;

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
}

/// Fields left `None` are not touched; `description: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDetail {
    pub team: Team,
    pub members: Vec<TeamMember>,
}

/// What removing a team did: admins delete it, teachers retire it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRemoval {
    Deleted,
    Deactivated,
}

fn team_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation_other("Team name must not be empty"));
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TeamService;

impl TeamService {
    pub fn new() -> Self {
        Self
    }

    /// Active teams of the actor's school; none for staff without a school.
    pub async fn list_teams<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
    ) -> Result<Vec<Team>, AppError> {
        access::require_staff(actor)?;
        match actor.school_id {
            Some(school_id) => Ok(teams::list_active_for_school(conn, school_id).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn create_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        req: NewTeam,
    ) -> Result<Team, AppError> {
        access::require_staff(actor)?;
        let school_id = actor.school_id.ok_or_else(|| {
            DomainError::validation_other("You must belong to a school to create teams")
        })?;

        let mut dto = TeamCreate::new(school_id, team_name(&req.name)?)
            .with_created_by(actor.user_id);
        if let Some(description) = req.description.filter(|d| !d.trim().is_empty()) {
            dto = dto.with_description(description);
        }

        let team = teams::create_team(conn, dto).await?;
        info!(
            team_id = team.id,
            school_id,
            created_by = actor.user_id,
            "Team created"
        );
        Ok(team)
    }

    pub async fn team_detail<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        team_id: i64,
    ) -> Result<TeamDetail, AppError> {
        let team = access::require_school_team(conn, actor, team_id).await?;
        let members = teams::list_members(conn, team.id).await?;
        Ok(TeamDetail { team, members })
    }

    pub async fn update_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        team_id: i64,
        patch: TeamPatch,
    ) -> Result<Team, AppError> {
        let team = access::require_school_team(conn, actor, team_id).await?;
        let dto = TeamUpdate {
            name: patch.name.as_deref().map(team_name).transpose()?,
            description: patch
                .description
                .map(|d| d.filter(|text| !text.trim().is_empty())),
            is_active: None,
        };
        Ok(teams::update_team(conn, team.id, dto).await?)
    }

    pub async fn remove_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        team_id: i64,
    ) -> Result<TeamRemoval, AppError> {
        let team = access::require_school_team(conn, actor, team_id).await?;

        let removal = if actor.role == Role::Admin {
            teams::delete_team(conn, team.id).await?;
            TeamRemoval::Deleted
        } else {
            teams::update_team(conn, team.id, TeamUpdate::deactivate()).await?;
            TeamRemoval::Deactivated
        };
        info!(team_id = team.id, by = actor.user_id, removal = ?removal, "Team removed");
        Ok(removal)
    }

    /// Add a user of the team's school. Adding an existing member is a conflict.
    pub async fn add_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        team_id: i64,
        user_id: i64,
        role: MembershipRole,
    ) -> Result<TeamDetail, AppError> {
        let team = access::require_school_team(conn, actor, team_id).await?;
        let user = users::find_user_by_id(conn, user_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
        })?;

        if user.school_id != Some(team.school_id) {
            return Err(DomainError::validation(
                ValidationKind::CrossSchoolMember,
                format!("User {user_id} does not belong to the team's school"),
            )
            .into());
        }
        if teams::is_member(conn, team.id, user.id).await? {
            return Err(DomainError::conflict(
                ConflictKind::UniqueMembership,
                format!("User {user_id} is already a member of team {}", team.id),
            )
            .into());
        }

        teams::add_member(conn, team.id, user.id, role).await?;
        info!(team_id = team.id, user_id = user.id, role = ?role, "Team member added");
        let members = teams::list_members(conn, team.id).await?;
        Ok(TeamDetail { team, members })
    }

    pub async fn remove_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        team_id: i64,
        user_id: i64,
    ) -> Result<TeamDetail, AppError> {
        let team = access::require_school_team(conn, actor, team_id).await?;
        teams::remove_member(conn, team.id, user_id).await?;
        info!(team_id = team.id, user_id, "Team member removed");
        let members = teams::list_members(conn, team.id).await?;
        Ok(TeamDetail { team, members })
    }
}
