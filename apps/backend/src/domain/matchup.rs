//! Matchup lifecycle rules: pairing, status timestamps, durations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchupStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchupStatus::Scheduled => "SCHEDULED",
            MatchupStatus::InProgress => "IN_PROGRESS",
            MatchupStatus::Completed => "COMPLETED",
            MatchupStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for MatchupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchupStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => Ok(MatchupStatus::Scheduled),
            "IN_PROGRESS" => Ok(MatchupStatus::InProgress),
            "COMPLETED" => Ok(MatchupStatus::Completed),
            "CANCELLED" => Ok(MatchupStatus::Cancelled),
            other => Err(format!("unknown matchup status '{other}'")),
        }
    }
}

/// Lifecycle timestamps touched by status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTimestamps {
    pub started_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
}

/// Timestamps after moving to `status`. Each one is set at most once.
pub fn timestamps_for_status(
    current: StatusTimestamps,
    status: MatchupStatus,
    now: OffsetDateTime,
) -> StatusTimestamps {
    match status {
        MatchupStatus::InProgress => StatusTimestamps {
            started_at: current.started_at.or(Some(now)),
            ..current
        },
        MatchupStatus::Completed => StatusTimestamps {
            completed_at: current.completed_at.or(Some(now)),
            ..current
        },
        MatchupStatus::Scheduled | MatchupStatus::Cancelled => current,
    }
}

/// A team as far as pairing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamRef {
    pub id: i64,
    pub school_id: i64,
}

/// Check that two teams can be paired by an actor from `actor_school_id`.
/// Returns the matchup's school (team 1's).
pub fn validate_pairing(
    team1: TeamRef,
    team2: TeamRef,
    actor_school_id: Option<i64>,
    actor_is_admin: bool,
) -> Result<i64, DomainError> {
    if team1.id == team2.id {
        return Err(DomainError::validation(
            ValidationKind::SameTeamMatchup,
            "A team cannot be matched against itself",
        ));
    }
    if team1.school_id != team2.school_id {
        return Err(DomainError::validation(
            ValidationKind::CrossSchoolMatchup,
            "Both teams must belong to the same school",
        ));
    }
    if !actor_is_admin && actor_school_id != Some(team1.school_id) {
        return Err(DomainError::validation(
            ValidationKind::CrossSchoolMatchup,
            "Teams must belong to your school",
        ));
    }
    Ok(team1.school_id)
}

/// Whole minutes from `start` to `end` (or `now` while still running).
pub fn duration_minutes(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Option<i64> {
    let start = start?;
    let end = end.unwrap_or(now);
    Some((end - start).whole_minutes().max(0))
}

/// Latest of the given instants.
pub fn last_activity<I>(instants: I) -> Option<OffsetDateTime>
where
    I: IntoIterator<Item = Option<OffsetDateTime>>,
{
    instants.into_iter().flatten().max()
}
