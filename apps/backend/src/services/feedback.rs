//! Reader feedback on instructions and the admin report built from it.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::feedback::{assess, FeedbackHealth, FeedbackSummary, RECENT_WINDOW};
use crate::domain::roles::{Actor, Audience};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::feedback::{self, Feedback};
use crate::repos::instructions;
use crate::services::access;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReceipt {
    pub feedback: Feedback,
    /// False when an earlier vote by the same user was overwritten.
    pub created: bool,
    pub summary: FeedbackSummary,
}

/// One instruction on the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionHealth {
    pub instruction_id: i64,
    pub title: String,
    pub audience: Audience,
    pub game_id: i64,
    pub step_number: i32,
    pub summary: FeedbackSummary,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeedbackStats {
    pub total_instructions: usize,
    pub problematic_count: usize,
    pub recent_issues_count: usize,
    pub no_feedback_count: usize,
    pub good_count: usize,
    pub total_feedback: u64,
    pub recent_feedback_count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeedbackReport {
    pub problematic: Vec<InstructionHealth>,
    pub recent_issues: Vec<InstructionHealth>,
    pub no_feedback: Vec<InstructionHealth>,
    pub good: Vec<InstructionHealth>,
    pub stats: FeedbackStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackService;

impl FeedbackService {
    pub fn new() -> Self {
        Self
    }

    /// Record the actor's vote on an instruction they can read. Inactive
    /// instructions and those written for the other audience read as missing.
    pub async fn submit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        instruction_id: i64,
        is_helpful: bool,
        comment: Option<String>,
    ) -> Result<FeedbackReceipt, AppError> {
        let instruction = instructions::require_instruction(conn, instruction_id).await?;
        if !instruction.is_active || instruction.audience != actor.role.instruction_audience() {
            return Err(DomainError::not_found(
                NotFoundKind::Instruction,
                format!("Instruction {instruction_id} not found"),
            )
            .into());
        }

        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let (feedback, created) =
            feedback::upsert(conn, instruction.id, actor.user_id, is_helpful, comment).await?;

        let votes = feedback::votes_by_instruction(conn, &[instruction.id]).await?;
        let summary = FeedbackSummary::from_votes(
            votes.get(&instruction.id).map(Vec::as_slice).unwrap_or_default(),
        );

        info!(
            instruction_id = instruction.id,
            user_id = actor.user_id,
            is_helpful,
            created,
            "Instruction feedback recorded"
        );
        Ok(FeedbackReceipt {
            feedback,
            created,
            summary,
        })
    }

    /// Every active instruction bucketed by feedback health, as of `now`.
    pub async fn report<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        now: OffsetDateTime,
    ) -> Result<FeedbackReport, AppError> {
        access::require_admin(actor)?;

        let rows = instructions::list_active_with_steps(conn).await?;
        let ids: Vec<i64> = rows.iter().map(|(i, _)| i.id).collect();
        let votes = feedback::votes_by_instruction(conn, &ids).await?;

        let mut report = FeedbackReport::default();
        for (instruction, step) in rows {
            let instruction_votes = votes
                .get(&instruction.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let assessment = assess(instruction_votes, now);
            report.stats.total_feedback += u64::from(assessment.summary.total);

            let entry = InstructionHealth {
                instruction_id: instruction.id,
                title: instruction.title,
                audience: instruction.audience,
                game_id: step.game_id,
                step_number: step.step_number,
                summary: assessment.summary,
                reasons: assessment.reasons,
            };
            match assessment.health {
                FeedbackHealth::Problematic => report.problematic.push(entry),
                FeedbackHealth::RecentIssues => report.recent_issues.push(entry),
                FeedbackHealth::NoFeedback => report.no_feedback.push(entry),
                FeedbackHealth::Good => report.good.push(entry),
            }
        }

        report.stats.total_instructions = ids.len();
        report.stats.problematic_count = report.problematic.len();
        report.stats.recent_issues_count = report.recent_issues.len();
        report.stats.no_feedback_count = report.no_feedback.len();
        report.stats.good_count = report.good.len();
        report.stats.recent_feedback_count =
            feedback::count_since(conn, now - RECENT_WINDOW).await?;
        Ok(report)
    }
}
