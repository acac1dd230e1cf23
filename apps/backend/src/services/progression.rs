//! Progression policy: current step, idempotent completion, dual-team
//! validation, the student access gate and the operator resets.
//!
//! Ledger rows are created here, at the point of need, with get-or-create
//! on their composite keys. Completion and validation use conditional
//! updates so racing callers cannot overwrite each other's timestamps.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::domain::progression::{
    current_step_number, gating_step, is_step_accessible, CurrentStepPolicy, StepState,
};
use crate::domain::roles::Actor;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::catalog::{self, GameStep};
use crate::repos::matchups::Matchup;
use crate::repos::step_progress::{self, StepProgress};
use crate::repos::team_validations::{self, TeamValidation};
use crate::services::access;

/// Result of a teacher validating one team for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationOutcome {
    /// The team was validated by this call.
    Validated { step_completed: bool },
    /// The team had already been validated; nothing changed.
    AlreadyValidated,
}

/// Result of a student submitting work for a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitOutcome {
    Completed { progress: StepProgress },
    /// The step only completes once a teacher validates both teams.
    AwaitingValidation,
}

/// An active step together with its ledger row, if one exists yet.
#[derive(Debug, Clone, PartialEq)]
pub struct StepWithProgress {
    pub step: GameStep,
    pub progress: Option<StepProgress>,
}

impl StepWithProgress {
    pub fn is_completed(&self) -> bool {
        self.progress.as_ref().is_some_and(|p| p.is_completed)
    }

    pub fn state(&self) -> StepState {
        StepState::new(self.step.step_number, self.is_completed())
    }
}

pub fn states(steps: &[StepWithProgress]) -> Vec<StepState> {
    steps.iter().map(StepWithProgress::state).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionService {
    policy: CurrentStepPolicy,
}

impl ProgressionService {
    pub fn new(policy: CurrentStepPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CurrentStepPolicy {
        self.policy
    }

    /// Active steps of the matchup's game, ordered, with their progress rows.
    pub async fn steps_with_progress<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
    ) -> Result<Vec<StepWithProgress>, AppError> {
        let steps = catalog::active_steps(conn, matchup.game_id).await?;
        let mut by_step: HashMap<i64, StepProgress> =
            step_progress::list_for_matchup(conn, matchup.id)
                .await?
                .into_iter()
                .map(|p| (p.step_id, p))
                .collect();

        Ok(steps
            .into_iter()
            .map(|step| StepWithProgress {
                progress: by_step.remove(&step.id),
                step,
            })
            .collect())
    }

    /// The step the matchup is on, or `None` once it is finished.
    pub async fn current_step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
    ) -> Result<Option<GameStep>, AppError> {
        let steps = self.steps_with_progress(conn, matchup).await?;
        Ok(self.current_of(steps))
    }

    pub fn current_of(&self, steps: Vec<StepWithProgress>) -> Option<GameStep> {
        let current = current_step_number(self.policy, &states(&steps))?;
        steps
            .into_iter()
            .find(|s| s.step.step_number == current)
            .map(|s| s.step)
    }

    /// `None` means the step has not been started.
    pub async fn get_progress_for_step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step_number: i32,
    ) -> Result<Option<StepProgress>, AppError> {
        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;
        Ok(step_progress::find(conn, matchup.id, step.id).await?)
    }

    /// Mark a step completed. Completing a completed step changes nothing
    /// and returns the existing row.
    pub async fn complete_step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step_number: i32,
        actor_id: Option<i64>,
    ) -> Result<StepProgress, AppError> {
        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;
        self.complete(conn, matchup, &step, actor_id).await
    }

    async fn complete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step: &GameStep,
        actor_id: Option<i64>,
    ) -> Result<StepProgress, AppError> {
        let row = step_progress::get_or_create(conn, matchup.id, step.id).await?;
        if row.is_completed {
            debug!(
                matchup_id = matchup.id,
                step_number = step.step_number,
                "Step already completed"
            );
            return Ok(row);
        }

        let now = OffsetDateTime::now_utc();
        if step_progress::mark_completed(conn, matchup.id, step.id, actor_id, now).await? {
            info!(
                matchup_id = matchup.id,
                step_number = step.step_number,
                completed_by = ?actor_id,
                "Step completed"
            );
        }

        step_progress::find(conn, matchup.id, step.id)
            .await?
            .ok_or_else(|| AppError::internal("step progress row missing after completion"))
    }

    /// Record a teacher's sign-off for one team. When the other team is
    /// already validated the step is completed.
    pub async fn validate_team_step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        team_id: i64,
        step_number: i32,
        teacher_id: i64,
    ) -> Result<ValidationOutcome, AppError> {
        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;

        if !step.requires_validation {
            return Err(DomainError::validation(
                ValidationKind::ValidationNotRequired,
                format!("Step {step_number} does not require validation"),
            )
            .into());
        }

        let Some(sibling_id) = matchup.sibling_of(team_id) else {
            return Err(DomainError::validation(
                ValidationKind::InvalidTeamForMatchup,
                format!("Team {team_id} is not part of matchup {}", matchup.id),
            )
            .into());
        };

        team_validations::get_or_create(conn, matchup.id, team_id, step.id).await?;
        let now = OffsetDateTime::now_utc();
        let fresh = team_validations::mark_validated(
            conn,
            matchup.id,
            team_id,
            step.id,
            Some(teacher_id),
            now,
        )
        .await?;

        if !fresh {
            debug!(
                matchup_id = matchup.id,
                team_id,
                step_number,
                "Team already validated"
            );
            return Ok(ValidationOutcome::AlreadyValidated);
        }

        info!(
            matchup_id = matchup.id,
            team_id,
            step_number,
            validated_by = teacher_id,
            "Team validated"
        );

        let sibling = team_validations::get_or_create(conn, matchup.id, sibling_id, step.id).await?;
        let step_completed = if sibling.is_validated {
            self.complete(conn, matchup, &step, Some(teacher_id)).await?;
            true
        } else {
            false
        };

        Ok(ValidationOutcome::Validated { step_completed })
    }

    /// False when no validation row exists.
    pub async fn is_team_validated<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        team_id: i64,
        step_number: i32,
    ) -> Result<bool, AppError> {
        Ok(self
            .team_validation(conn, matchup, team_id, step_number)
            .await?
            .is_some_and(|v| v.is_validated))
    }

    pub async fn team_validation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        team_id: i64,
        step_number: i32,
    ) -> Result<Option<TeamValidation>, AppError> {
        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;
        if !matchup.involves_team(team_id) {
            return Err(DomainError::validation(
                ValidationKind::InvalidTeamForMatchup,
                format!("Team {team_id} is not part of matchup {}", matchup.id),
            )
            .into());
        }
        Ok(team_validations::find(conn, matchup.id, team_id, step.id).await?)
    }

    /// Students may open a step once the previous active step is done.
    /// Teachers and admins are never gated.
    pub async fn ensure_step_accessible<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step_number: i32,
        actor: &Actor,
    ) -> Result<(), AppError> {
        let steps = self.steps_with_progress(conn, matchup).await?;
        if !steps.iter().any(|s| s.step.step_number == step_number) {
            return Err(DomainError::step_not_found(matchup.game_id, step_number).into());
        }
        if actor.role.is_staff() {
            return Ok(());
        }

        let states = states(&steps);
        if is_step_accessible(&states, step_number) {
            return Ok(());
        }

        let previous = gating_step(&states, step_number).map_or(step_number - 1, |s| s.step_number);
        Err(DomainError::validation(
            ValidationKind::StepLocked,
            format!("Complete step {previous} before starting step {step_number}"),
        )
        .into())
    }

    /// A team member submits work for a step. Steps without validation
    /// complete right away; the others wait for the teacher.
    pub async fn submit_step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step_number: i32,
        actor: &Actor,
    ) -> Result<SubmitOutcome, AppError> {
        let team_id = access::require_member(conn, matchup, actor.user_id).await?;
        self.ensure_step_accessible(conn, matchup, step_number, actor)
            .await?;

        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;
        if step.requires_validation {
            info!(
                matchup_id = matchup.id,
                team_id,
                step_number,
                "Submission awaiting teacher validation"
            );
            return Ok(SubmitOutcome::AwaitingValidation);
        }

        let progress = self
            .complete(conn, matchup, &step, Some(actor.user_id))
            .await?;
        Ok(SubmitOutcome::Completed { progress })
    }

    /// Complete every validation step whose two teams are validated but
    /// whose progress row is not completed. Returns the completed numbers.
    pub async fn reconcile_validation_steps<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
    ) -> Result<Vec<i32>, AppError> {
        let steps = self.steps_with_progress(conn, matchup).await?;
        let validations = team_validations::list_for_matchup(conn, matchup.id).await?;

        let mut completed = Vec::new();
        for entry in steps
            .iter()
            .filter(|s| s.step.requires_validation && !s.is_completed())
        {
            let for_team = |team_id: i64| {
                validations
                    .iter()
                    .find(|v| v.step_id == entry.step.id && v.team_id == team_id && v.is_validated)
            };
            let (Some(a), Some(b)) = (for_team(matchup.team1_id), for_team(matchup.team2_id))
            else {
                continue;
            };

            let last = if a.validated_at >= b.validated_at { a } else { b };
            self.complete(conn, matchup, &entry.step, last.validated_by)
                .await?;
            completed.push(entry.step.step_number);
        }

        if completed.is_empty() {
            debug!(matchup_id = matchup.id, "Reconcile found nothing to complete");
        } else {
            warn!(
                matchup_id = matchup.id,
                steps = ?completed,
                "Reconciled validated steps that were not completed"
            );
        }
        Ok(completed)
    }

    /// Operator tool: mark a step incomplete. False when no row existed.
    pub async fn reset_step_progress<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step_number: i32,
    ) -> Result<bool, AppError> {
        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;
        let existed = step_progress::reset(conn, matchup.id, step.id).await?;
        info!(
            matchup_id = matchup.id,
            step_number,
            existed,
            "Step progress reset"
        );
        Ok(existed)
    }

    /// Operator tool: clear validation rows for a step, for one team or
    /// both. Returns how many rows were reset.
    pub async fn reset_team_validations<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        matchup: &Matchup,
        step_number: i32,
        team_id: Option<i64>,
    ) -> Result<u64, AppError> {
        let step = catalog::require_active_step(conn, matchup.game_id, step_number).await?;
        if let Some(team_id) = team_id {
            if !matchup.involves_team(team_id) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidTeamForMatchup,
                    format!("Team {team_id} is not part of matchup {}", matchup.id),
                )
                .into());
            }
        }

        let count = team_validations::reset(conn, matchup.id, step.id, team_id).await?;
        info!(
            matchup_id = matchup.id,
            step_number,
            team_id = ?team_id,
            count,
            "Team validations reset"
        );
        Ok(count)
    }
}
