//! Thumbs up/down feedback on instructions and the rules that flag an
//! instruction as needing attention.

use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// Negative feedback newer than this counts as a recent issue.
pub const RECENT_WINDOW: Duration = Duration::days(7);

/// One reader's opinion of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub is_helpful: bool,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedbackSummary {
    pub total: u32,
    pub thumbs_up: u32,
    pub thumbs_down: u32,
    /// Share of helpful votes in percent, one decimal; 0 with no votes.
    pub percentage_positive: f64,
}

impl FeedbackSummary {
    pub fn from_votes(votes: &[Vote]) -> Self {
        let thumbs_up = votes.iter().filter(|v| v.is_helpful).count() as u32;
        let total = votes.len() as u32;
        let percentage_positive = if total == 0 {
            0.0
        } else {
            (f64::from(thumbs_up) * 1000.0 / f64::from(total)).round() / 10.0
        };
        Self {
            total,
            thumbs_up,
            thumbs_down: total - thumbs_up,
            percentage_positive,
        }
    }

    /// Ten or more votes under 70% positive, or five or more under 60%.
    pub fn is_problematic(&self) -> bool {
        if self.total >= 10 {
            self.percentage_positive < 70.0
        } else if self.total >= 5 {
            self.percentage_positive < 60.0
        } else {
            false
        }
    }
}

pub fn has_recent_negative(votes: &[Vote], now: OffsetDateTime) -> bool {
    let cutoff = now - RECENT_WINDOW;
    votes
        .iter()
        .any(|v| !v.is_helpful && v.updated_at >= cutoff)
}

/// Bucket an instruction lands in on the feedback report. Checked in
/// declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackHealth {
    Problematic,
    RecentIssues,
    NoFeedback,
    Good,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub health: FeedbackHealth,
    pub summary: FeedbackSummary,
    pub reasons: Vec<String>,
}

pub fn assess(votes: &[Vote], now: OffsetDateTime) -> Assessment {
    let summary = FeedbackSummary::from_votes(votes);
    let recent_negative = has_recent_negative(votes, now);

    let mut reasons = Vec::new();
    if summary.total >= 10 && summary.percentage_positive < 70.0 {
        reasons.push(format!(
            "Low satisfaction: {}% positive from {} reviews",
            summary.percentage_positive, summary.total
        ));
    } else if summary.total >= 5 && summary.percentage_positive < 60.0 {
        reasons.push(format!(
            "Very low satisfaction: {}% positive from {} reviews",
            summary.percentage_positive, summary.total
        ));
    }
    if recent_negative {
        reasons.push("Recent negative feedback (last 7 days)".to_string());
    }

    let health = if summary.is_problematic() {
        FeedbackHealth::Problematic
    } else if recent_negative {
        FeedbackHealth::RecentIssues
    } else if summary.total == 0 {
        FeedbackHealth::NoFeedback
    } else {
        FeedbackHealth::Good
    };

    Assessment {
        health,
        summary,
        reasons,
    }
}
