//! Step progression rules over an ordered set of active step numbers.
//!
//! Everything here works on plain step numbers and completion flags; the
//! service layer loads those from the ledgers and applies the result.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the "current step" of a matchup is derived from its completed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentStepPolicy {
    /// Lowest active step that is not completed.
    #[default]
    FirstIncomplete,
    /// One past the highest completed step number (step 1 when nothing is
    /// completed). Gaps left by out-of-order completion are ignored.
    AfterHighestCompleted,
}

impl CurrentStepPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CurrentStepPolicy::FirstIncomplete => "first_incomplete",
            CurrentStepPolicy::AfterHighestCompleted => "after_highest_completed",
        }
    }
}

impl fmt::Display for CurrentStepPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrentStepPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_incomplete" | "first-incomplete" => Ok(CurrentStepPolicy::FirstIncomplete),
            "after_highest_completed" | "after-highest-completed" => {
                Ok(CurrentStepPolicy::AfterHighestCompleted)
            }
            other => Err(format!(
                "unknown current step policy '{other}' (expected first_incomplete | after_highest_completed)"
            )),
        }
    }
}

/// Completion snapshot for one active step of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepState {
    pub step_number: i32,
    pub is_completed: bool,
}

impl StepState {
    pub fn new(step_number: i32, is_completed: bool) -> Self {
        Self {
            step_number,
            is_completed,
        }
    }
}

fn completed_set(steps: &[StepState]) -> BTreeSet<i32> {
    steps
        .iter()
        .filter(|s| s.is_completed)
        .map(|s| s.step_number)
        .collect()
}

/// Current step number under `policy`, or `None` when the matchup is done.
///
/// `steps` holds the game's active steps; order does not matter.
pub fn current_step_number(policy: CurrentStepPolicy, steps: &[StepState]) -> Option<i32> {
    match policy {
        CurrentStepPolicy::FirstIncomplete => steps
            .iter()
            .filter(|s| !s.is_completed)
            .map(|s| s.step_number)
            .min(),
        CurrentStepPolicy::AfterHighestCompleted => {
            // No successor past i32::MAX, so that is terminal too.
            let next = match completed_set(steps).last() {
                Some(max) => max.checked_add(1)?,
                None => 1,
            };
            steps
                .iter()
                .any(|s| s.step_number == next)
                .then_some(next)
        }
    }
}

/// Active steps numbered below `current` that are not completed.
///
/// Always empty under `FirstIncomplete`. When the matchup is done
/// (`current == None`) every incomplete step counts as skipped.
pub fn skipped_steps(steps: &[StepState], current: Option<i32>) -> Vec<i32> {
    let mut skipped: Vec<i32> = steps
        .iter()
        .filter(|s| !s.is_completed)
        .filter(|s| current.map_or(true, |c| s.step_number < c))
        .map(|s| s.step_number)
        .collect();
    skipped.sort_unstable();
    skipped
}

/// The active step that gates `step_number`: the highest-numbered active
/// step below it. `None` means nothing gates it.
pub fn gating_step(steps: &[StepState], step_number: i32) -> Option<StepState> {
    steps
        .iter()
        .filter(|s| s.step_number < step_number)
        .max_by_key(|s| s.step_number)
        .copied()
}

/// A step is open once the step before it is completed. The first active
/// step is always open.
pub fn is_step_accessible(steps: &[StepState], step_number: i32) -> bool {
    gating_step(steps, step_number).map_or(true, |prev| prev.is_completed)
}

/// The other side of a matchup, or `None` if `team_id` is on neither side.
pub fn sibling_team(team1_id: i64, team2_id: i64, team_id: i64) -> Option<i64> {
    if team_id == team1_id {
        Some(team2_id)
    } else if team_id == team2_id {
        Some(team1_id)
    } else {
        None
    }
}
