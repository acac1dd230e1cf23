//! Repository functions: domain models over the SeaORM adapters.

pub mod catalog;
pub mod feedback;
pub mod instructions;
pub mod matchups;
pub mod schools;
pub mod step_progress;
pub mod team_validations;
pub mod teams;
pub mod users;
