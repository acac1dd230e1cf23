use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::feedback_sea;
use crate::domain::feedback::Vote;
use crate::entities::instruction_feedback;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub id: i64,
    pub instruction_id: i64,
    pub user_id: i64,
    pub is_helpful: bool,
    pub comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Feedback {
    pub fn vote(&self) -> Vote {
        Vote {
            is_helpful: self.is_helpful,
            updated_at: self.updated_at,
        }
    }
}

/// Returns the stored row and whether it was newly created.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
    user_id: i64,
    is_helpful: bool,
    comment: Option<String>,
) -> Result<(Feedback, bool), DomainError> {
    let (model, created) =
        feedback_sea::upsert(conn, instruction_id, user_id, is_helpful, comment).await?;
    Ok((Feedback::from(model), created))
}

/// Votes grouped by instruction id; instructions without feedback are absent.
pub async fn votes_by_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_ids: &[i64],
) -> Result<HashMap<i64, Vec<Vote>>, DomainError> {
    let rows = feedback_sea::list_for_instructions(conn, instruction_ids).await?;
    let mut grouped: HashMap<i64, Vec<Vote>> = HashMap::new();
    for row in rows.into_iter().map(Feedback::from) {
        grouped.entry(row.instruction_id).or_default().push(row.vote());
    }
    Ok(grouped)
}

pub async fn count_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cutoff: OffsetDateTime,
) -> Result<u64, DomainError> {
    Ok(feedback_sea::count_since(conn, cutoff).await?)
}

impl From<instruction_feedback::Model> for Feedback {
    fn from(model: instruction_feedback::Model) -> Self {
        Self {
            id: model.id,
            instruction_id: model.instruction_id,
            user_id: model.user_id,
            is_helpful: model.is_helpful,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
