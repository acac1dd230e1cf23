//! Admin authoring of instruction chains under a game step.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::instructions_sea::{InstructionCreate, InstructionUpdate};
use crate::domain::instructions::{check_link, ChainNode};
use crate::domain::roles::{Actor, Audience};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::catalog::{self, GameStep};
use crate::repos::instructions::{self, Instruction};
use crate::services::access;

#[derive(Debug, Clone)]
pub struct NewInstruction {
    pub audience: Audience,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub next_instruction_id: Option<i64>,
}

/// Fields left `None` are not touched; `next_instruction_id: Some(None)` unlinks.
#[derive(Debug, Clone, Default)]
pub struct InstructionPatch {
    pub audience: Option<Audience>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub next_instruction_id: Option<Option<i64>>,
}

fn required_text(field: &str, raw: &str) -> Result<String, DomainError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::validation_other(format!(
            "{field} must not be empty"
        )));
    }
    Ok(text.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthoringService;

impl AuthoringService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_instruction<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        game_id: i64,
        step_number: i32,
        req: NewInstruction,
    ) -> Result<Instruction, AppError> {
        access::require_admin(actor)?;
        let step = self.step(conn, game_id, step_number).await?;

        if let Some(next_id) = req.next_instruction_id {
            let nodes = self.nodes(conn, step.id).await?;
            check_link(&nodes, None, step.id, req.audience, next_id)?;
        }

        let mut dto = InstructionCreate::new(
            step.id,
            req.audience.into(),
            required_text("Title", &req.title)?,
            required_text("Content", &req.content)?,
        );
        if let Some(next_id) = req.next_instruction_id {
            dto = dto.with_next(next_id);
        }
        if !req.is_active {
            dto = dto.inactive();
        }

        let instruction = instructions::create_instruction(conn, dto).await?;
        info!(
            instruction_id = instruction.id,
            step_id = step.id,
            audience = ?instruction.audience,
            "Instruction created"
        );
        Ok(instruction)
    }

    pub async fn update_instruction<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        game_id: i64,
        step_number: i32,
        instruction_id: i64,
        patch: InstructionPatch,
    ) -> Result<Instruction, AppError> {
        access::require_admin(actor)?;
        let step = self.step(conn, game_id, step_number).await?;
        let current = self.instruction_in_step(conn, &step, instruction_id).await?;

        let audience = patch.audience.unwrap_or(current.audience);
        let next_id = match patch.next_instruction_id {
            Some(next) => next,
            None => current.next_instruction_id,
        };
        if let Some(next_id) = next_id {
            let nodes = self.nodes(conn, step.id).await?;
            check_link(&nodes, Some(current.id), step.id, audience, next_id)?;
        }

        let dto = InstructionUpdate {
            role: patch.audience.map(Into::into),
            title: patch
                .title
                .as_deref()
                .map(|t| required_text("Title", t))
                .transpose()?,
            content: patch
                .content
                .as_deref()
                .map(|c| required_text("Content", c))
                .transpose()?,
            is_active: patch.is_active,
            next_instruction_id: patch.next_instruction_id,
        };
        let updated = instructions::update_instruction(conn, current.id, dto).await?;
        info!(instruction_id = updated.id, step_id = step.id, "Instruction updated");
        Ok(updated)
    }

    pub async fn delete_instruction<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        game_id: i64,
        step_number: i32,
        instruction_id: i64,
    ) -> Result<(), AppError> {
        access::require_admin(actor)?;
        let step = self.step(conn, game_id, step_number).await?;
        let current = self.instruction_in_step(conn, &step, instruction_id).await?;
        instructions::delete_instruction(conn, current.id).await?;
        info!(instruction_id = current.id, step_id = step.id, "Instruction deleted");
        Ok(())
    }

    async fn step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        step_number: i32,
    ) -> Result<GameStep, AppError> {
        catalog::require_game(conn, game_id).await?;
        Ok(catalog::require_step(conn, game_id, step_number).await?)
    }

    async fn instruction_in_step<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        step: &GameStep,
        instruction_id: i64,
    ) -> Result<Instruction, AppError> {
        let instruction = instructions::require_instruction(conn, instruction_id).await?;
        if instruction.step_id != step.id {
            return Err(DomainError::not_found(
                NotFoundKind::Instruction,
                format!(
                    "Instruction {instruction_id} not found in step {}",
                    step.step_number
                ),
            )
            .into());
        }
        Ok(instruction)
    }

    async fn nodes<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        step_id: i64,
    ) -> Result<Vec<ChainNode>, AppError> {
        let all = instructions::list_for_step(conn, step_id).await?;
        Ok(all.iter().map(Instruction::chain_node).collect())
    }
}
