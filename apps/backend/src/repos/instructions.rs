use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::instructions_sea;
use crate::adapters::instructions_sea::{InstructionCreate, InstructionUpdate};
use crate::domain::instructions::ChainNode;
use crate::domain::roles::Audience;
use crate::entities::instruction_steps::{self, InstructionRole};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::catalog::GameStep;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    pub id: i64,
    pub step_id: i64,
    pub audience: Audience,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub next_instruction_id: Option<i64>,
}

impl Instruction {
    pub fn chain_node(&self) -> ChainNode {
        ChainNode {
            id: self.id,
            step_id: self.step_id,
            audience: self.audience,
            is_active: self.is_active,
            next_id: self.next_instruction_id,
        }
    }
}

pub async fn create_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: InstructionCreate,
) -> Result<Instruction, DomainError> {
    let model = instructions_sea::create_instruction(conn, dto).await?;
    Ok(Instruction::from(model))
}

pub async fn find_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
) -> Result<Option<Instruction>, DomainError> {
    let model = instructions_sea::find_instruction(conn, instruction_id).await?;
    Ok(model.map(Instruction::from))
}

pub async fn require_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
) -> Result<Instruction, DomainError> {
    find_instruction(conn, instruction_id)
        .await?
        .ok_or_else(|| instruction_not_found(instruction_id))
}

pub async fn update_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
    dto: InstructionUpdate,
) -> Result<Instruction, DomainError> {
    let model = instructions_sea::find_instruction(conn, instruction_id)
        .await?
        .ok_or_else(|| instruction_not_found(instruction_id))?;
    let updated = instructions_sea::update_instruction(conn, model, dto).await?;
    Ok(Instruction::from(updated))
}

pub async fn delete_instruction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
) -> Result<(), DomainError> {
    if instructions_sea::delete_instruction(conn, instruction_id).await? == 0 {
        return Err(instruction_not_found(instruction_id));
    }
    Ok(())
}

/// Every active instruction across all games, with its step.
pub async fn list_active_with_steps<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(Instruction, GameStep)>, DomainError> {
    let rows = instructions_sea::list_active_with_steps(conn).await?;
    Ok(rows
        .into_iter()
        .map(|(instruction, step)| (Instruction::from(instruction), GameStep::from(step)))
        .collect())
}

fn instruction_not_found(instruction_id: i64) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Instruction,
        format!("Instruction {instruction_id} not found"),
    )
}

pub async fn set_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    instruction_id: i64,
    next_id: Option<i64>,
) -> Result<(), DomainError> {
    instructions_sea::set_next(conn, instruction_id, next_id).await?;
    Ok(())
}

pub async fn list_for_step<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    step_id: i64,
) -> Result<Vec<Instruction>, DomainError> {
    let rows = instructions_sea::list_for_step(conn, step_id).await?;
    Ok(rows.into_iter().map(Instruction::from).collect())
}

impl From<InstructionRole> for Audience {
    fn from(role: InstructionRole) -> Self {
        match role {
            InstructionRole::Student => Audience::Student,
            InstructionRole::Teacher => Audience::Teacher,
        }
    }
}

impl From<Audience> for InstructionRole {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Student => InstructionRole::Student,
            Audience::Teacher => InstructionRole::Teacher,
        }
    }
}

impl From<instruction_steps::Model> for Instruction {
    fn from(model: instruction_steps::Model) -> Self {
        Self {
            id: model.id,
            step_id: model.step_id,
            audience: model.role.into(),
            title: model.title,
            content: model.content,
            is_active: model.is_active,
            next_instruction_id: model.next_instruction_id,
        }
    }
}
