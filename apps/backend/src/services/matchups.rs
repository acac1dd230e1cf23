//! Matchup lifecycle and the per-step overview shown to teachers and teams.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::adapters::matchups_sea::MatchupCreate;
use crate::domain::matchup::{
    duration_minutes, last_activity, timestamps_for_status, validate_pairing, MatchupStatus,
    TeamRef,
};
use crate::domain::progression::{current_step_number, skipped_steps};
use crate::domain::roles::{Actor, Role};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::catalog::{self, GameStep};
use crate::repos::matchups::{self, Matchup};
use crate::repos::team_validations::{self, TeamValidation};
use crate::repos::teams;
use crate::services::access;
use crate::services::catalog::total_estimated_duration;
use crate::services::progression::{states, ProgressionService, StepWithProgress};

/// Input for creating a matchup.
#[derive(Debug, Clone)]
pub struct NewMatchup {
    pub game_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub scheduled_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupWithStep {
    pub matchup: Matchup,
    pub current_step: Option<GameStep>,
}

/// One row of the overview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOverview {
    pub step_number: i32,
    pub title: String,
    pub estimated_duration_minutes: i32,
    pub requires_validation: bool,
    pub is_completed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    pub completed_by: Option<i64>,
    pub is_current: bool,
    pub can_complete: bool,
    pub team1_validated: bool,
    pub team2_validated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupOverview {
    pub matchup: Matchup,
    pub steps: Vec<StepOverview>,
    pub current_step: Option<i32>,
    pub skipped_steps: Vec<i32>,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub total_estimated_duration_minutes: i64,
    pub duration_minutes: Option<i64>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_activity: Option<OffsetDateTime>,
    /// Steps completed by the reconcile sweep while building this view.
    pub reconciled_steps: Vec<i32>,
}

/// Whole minutes the matchup has been running (or ran).
pub fn matchup_duration_minutes(matchup: &Matchup, now: OffsetDateTime) -> Option<i64> {
    duration_minutes(matchup.started_at, matchup.completed_at, now)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchupService {
    progression: ProgressionService,
}

impl MatchupService {
    pub fn new(progression: ProgressionService) -> Self {
        Self { progression }
    }

    /// Pair two teams of the actor's school for a game. Starts SCHEDULED.
    pub async fn create_matchup<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        req: NewMatchup,
    ) -> Result<Matchup, AppError> {
        access::require_staff(actor)?;

        let team1 = teams::require_team(conn, req.team1_id).await?;
        let team2 = teams::require_team(conn, req.team2_id).await?;
        let school_id = validate_pairing(
            TeamRef {
                id: team1.id,
                school_id: team1.school_id,
            },
            TeamRef {
                id: team2.id,
                school_id: team2.school_id,
            },
            actor.school_id,
            actor.role == Role::Admin,
        )?;

        let game = catalog::require_game(conn, req.game_id).await?;
        if !game.is_active {
            return Err(DomainError::validation(
                ValidationKind::GameInactive,
                format!("Game {} is not active", game.id),
            )
            .into());
        }

        let mut dto = MatchupCreate::new(game.id, team1.id, team2.id, school_id)
            .with_created_by(actor.user_id);
        if let Some(date) = req.scheduled_date {
            dto = dto.with_scheduled_date(date);
        }
        if let Some(notes) = req.notes {
            dto = dto.with_notes(notes);
        }

        let matchup = matchups::create_matchup(conn, dto).await?;
        info!(
            matchup_id = matchup.id,
            game_id = game.id,
            team1_id = team1.id,
            team2_id = team2.id,
            created_by = actor.user_id,
            "Matchup created"
        );
        Ok(matchup)
    }

    /// Set any status. Timestamps are filled on first entry into
    /// IN_PROGRESS / COMPLETED and never cleared. Step progress is untouched.
    pub async fn update_status<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        status: MatchupStatus,
    ) -> Result<Matchup, AppError> {
        let timestamps =
            timestamps_for_status(matchup.timestamps(), status, OffsetDateTime::now_utc());
        let updated = matchups::update_status(conn, matchup.id, status, timestamps).await?;
        info!(
            matchup_id = matchup.id,
            from = %matchup.status,
            to = %status,
            "Matchup status changed"
        );
        Ok(updated)
    }

    /// Matchups of a school, newest first, each with its current step.
    pub async fn list_for_school<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        school_id: i64,
    ) -> Result<Vec<MatchupWithStep>, AppError> {
        let found = matchups::list_for_school(conn, school_id).await?;
        self.with_current_steps(conn, found).await
    }

    /// Everything `actor` may manage: their school's matchups and the ones
    /// they created elsewhere. Matches `can_manage_matchup`.
    pub async fn list_for_manager<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
    ) -> Result<Vec<MatchupWithStep>, AppError> {
        access::require_staff(actor)?;
        let found = matchups::list_managed(conn, actor.school_id, actor.user_id).await?;
        self.with_current_steps(conn, found).await
    }

    /// Matchups of every team the user is on, each with its current step.
    pub async fn list_for_student<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<MatchupWithStep>, AppError> {
        let team_ids = teams::team_ids_for_user(conn, user_id).await?;
        let found = matchups::list_for_teams(conn, &team_ids).await?;
        self.with_current_steps(conn, found).await
    }

    async fn with_current_steps<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        found: Vec<Matchup>,
    ) -> Result<Vec<MatchupWithStep>, AppError> {
        let mut out = Vec::with_capacity(found.len());
        for matchup in found {
            let current_step = self.progression.current_step(conn, &matchup).await?;
            out.push(MatchupWithStep {
                matchup,
                current_step,
            });
        }
        Ok(out)
    }

    /// Per-step status of a matchup. Managers trigger the reconcile sweep
    /// first so dual-validated steps never show as pending.
    pub async fn overview<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        is_manager: bool,
    ) -> Result<MatchupOverview, AppError> {
        let reconciled_steps = if is_manager {
            self.progression
                .reconcile_validation_steps(conn, matchup)
                .await?
        } else {
            Vec::new()
        };

        let steps = self.progression.steps_with_progress(conn, matchup).await?;
        let validations = team_validations::list_for_matchup(conn, matchup.id).await?;
        Ok(build_overview(
            matchup,
            &steps,
            &validations,
            self.progression.policy(),
            is_manager,
            reconciled_steps,
            OffsetDateTime::now_utc(),
        ))
    }
}

fn is_validated(validations: &[TeamValidation], step_id: i64, team_id: i64) -> bool {
    validations
        .iter()
        .any(|v| v.step_id == step_id && v.team_id == team_id && v.is_validated)
}

/// Assemble the overview from loaded rows. Pure, so it is tested directly.
pub fn build_overview(
    matchup: &Matchup,
    steps: &[StepWithProgress],
    validations: &[TeamValidation],
    policy: crate::domain::CurrentStepPolicy,
    is_manager: bool,
    reconciled_steps: Vec<i32>,
    now: OffsetDateTime,
) -> MatchupOverview {
    let states = states(steps);
    let current = current_step_number(policy, &states);

    let rows: Vec<StepOverview> = steps
        .iter()
        .map(|entry| {
            let step = &entry.step;
            let is_completed = entry.is_completed();
            let is_current = current == Some(step.step_number);
            StepOverview {
                step_number: step.step_number,
                title: step.title.clone(),
                estimated_duration_minutes: step.estimated_duration_minutes,
                requires_validation: step.requires_validation,
                is_completed,
                completed_at: entry.progress.as_ref().and_then(|p| p.completed_at),
                completed_by: entry.progress.as_ref().and_then(|p| p.completed_by),
                is_current,
                can_complete: is_manager
                    && is_current
                    && !is_completed
                    && !step.requires_validation,
                team1_validated: is_validated(validations, step.id, matchup.team1_id),
                team2_validated: is_validated(validations, step.id, matchup.team2_id),
            }
        })
        .collect();

    let activity = [
        Some(matchup.created_at),
        matchup.started_at,
        matchup.completed_at,
    ]
    .into_iter()
    .chain(steps.iter().map(|s| s.progress.as_ref().and_then(|p| p.completed_at)))
    .chain(validations.iter().map(|v| v.validated_at));

    let all_steps: Vec<GameStep> = steps.iter().map(|s| s.step.clone()).collect();

    MatchupOverview {
        matchup: matchup.clone(),
        completed_steps: rows.iter().filter(|r| r.is_completed).count(),
        total_steps: rows.len(),
        steps: rows,
        current_step: current,
        skipped_steps: skipped_steps(&states, current),
        total_estimated_duration_minutes: total_estimated_duration(&all_steps),
        duration_minutes: matchup_duration_minutes(matchup, now),
        last_activity: last_activity(activity),
        reconciled_steps,
    }
}
