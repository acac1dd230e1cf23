//! DTOs for matchups_sea adapter.

use time::OffsetDateTime;

use crate::entities::game_matchups::MatchupStatus;

#[derive(Debug, Clone)]
pub struct MatchupCreate {
    pub game_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub school_id: i64,
    pub created_by: Option<i64>,
    pub scheduled_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
}

impl MatchupCreate {
    pub fn new(game_id: i64, team1_id: i64, team2_id: i64, school_id: i64) -> Self {
        Self {
            game_id,
            team1_id,
            team2_id,
            school_id,
            created_by: None,
            scheduled_date: None,
            notes: None,
        }
    }

    pub fn with_created_by(mut self, user_id: i64) -> Self {
        self.created_by = Some(user_id);
        self
    }

    pub fn with_scheduled_date(mut self, date: OffsetDateTime) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// New status plus the lifecycle timestamps that go with it.
#[derive(Debug, Clone)]
pub struct MatchupStatusUpdate {
    pub id: i64,
    pub status: MatchupStatus,
    pub started_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
}
