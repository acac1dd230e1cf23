//! DTOs for instructions_sea adapter.

use crate::entities::instruction_steps::InstructionRole;

#[derive(Debug, Clone)]
pub struct InstructionCreate {
    pub step_id: i64,
    pub role: InstructionRole,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub next_instruction_id: Option<i64>,
}

impl InstructionCreate {
    pub fn new(
        step_id: i64,
        role: InstructionRole,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            step_id,
            role,
            title: title.into(),
            content: content.into(),
            is_active: true,
            next_instruction_id: None,
        }
    }

    pub fn with_next(mut self, next_instruction_id: i64) -> Self {
        self.next_instruction_id = Some(next_instruction_id);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Partial update; `next_instruction_id: Some(None)` unlinks.
#[derive(Debug, Clone, Default)]
pub struct InstructionUpdate {
    pub role: Option<InstructionRole>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub next_instruction_id: Option<Option<i64>>,
}
