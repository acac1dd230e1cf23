//! Who may read or act on a matchup, a team, or the catalog.
//!
//! The progression policy does not authorize; routes call these first.

use sea_orm::ConnectionTrait;

use crate::domain::roles::{can_manage_matchup, Actor, Role};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::matchups::Matchup;
use crate::repos::teams::{self, Team};

/// How the actor relates to a matchup they are allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Manager,
    Member { team_id: i64 },
}

impl Viewer {
    pub fn is_manager(self) -> bool {
        matches!(self, Viewer::Manager)
    }
}

pub fn require_staff(actor: &Actor) -> Result<(), AppError> {
    if actor.role.is_staff() {
        Ok(())
    } else {
        Err(AppError::forbidden(
            ErrorCode::InsufficientRole,
            "Only teachers and admins can do this",
        ))
    }
}

pub fn require_admin(actor: &Actor) -> Result<(), AppError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::forbidden(
            ErrorCode::InsufficientRole,
            "Only admins can do this",
        ))
    }
}

/// An active team of the actor's own school. Teams elsewhere read as missing.
pub async fn require_school_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor: &Actor,
    team_id: i64,
) -> Result<Team, AppError> {
    require_staff(actor)?;
    let team = teams::require_active_team(conn, team_id).await?;
    if actor.school_id == Some(team.school_id) {
        Ok(team)
    } else {
        Err(DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found")).into())
    }
}

pub fn require_manager(actor: &Actor, matchup: &Matchup) -> Result<(), AppError> {
    require_staff(actor)?;
    if can_manage_matchup(actor, matchup.school_id, matchup.created_by) {
        Ok(())
    } else {
        Err(AppError::forbidden(
            ErrorCode::Forbidden,
            format!("You cannot manage matchup {}", matchup.id),
        ))
    }
}

/// The team the user plays for in `matchup`, if any. Team 1 wins a tie.
pub async fn member_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup: &Matchup,
    user_id: i64,
) -> Result<Option<i64>, AppError> {
    for team_id in [matchup.team1_id, matchup.team2_id] {
        if teams::is_member(conn, team_id, user_id).await? {
            return Ok(Some(team_id));
        }
    }
    Ok(None)
}

pub async fn require_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup: &Matchup,
    user_id: i64,
) -> Result<i64, AppError> {
    member_team(conn, matchup, user_id).await?.ok_or_else(|| {
        AppError::forbidden(
            ErrorCode::NotAMember,
            format!("You are not on a team in matchup {}", matchup.id),
        )
    })
}

/// Managers first, then team members; anyone else is rejected.
pub async fn require_viewer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor: &Actor,
    matchup: &Matchup,
) -> Result<Viewer, AppError> {
    if can_manage_matchup(actor, matchup.school_id, matchup.created_by) {
        return Ok(Viewer::Manager);
    }
    match member_team(conn, matchup, actor.user_id).await? {
        Some(team_id) => Ok(Viewer::Member { team_id }),
        None if actor.role == Role::Student => Err(AppError::forbidden(
            ErrorCode::NotAMember,
            format!("You are not on a team in matchup {}", matchup.id),
        )),
        None => Err(AppError::forbidden(
            ErrorCode::Forbidden,
            format!("You cannot view matchup {}", matchup.id),
        )),
    }
}
