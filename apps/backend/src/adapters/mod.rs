//! SeaORM adapters. Functions return `DbErr`; repos map to `DomainError`.

pub mod catalog_sea;
pub mod feedback_sea;
pub mod instructions_sea;
pub mod matchups_sea;
pub mod schools_sea;
pub mod step_progress_sea;
pub mod team_validations_sea;
pub mod teams_sea;
pub mod users_sea;
