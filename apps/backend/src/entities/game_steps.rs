use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_steps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "step_number")]
    pub step_number: i32,
    pub title: String,
    pub description: Option<String>,
    #[sea_orm(column_name = "url_pattern")]
    pub url_pattern: Option<String>,
    #[sea_orm(column_name = "estimated_duration_minutes")]
    pub estimated_duration_minutes: i32,
    #[sea_orm(column_name = "requires_validation")]
    pub requires_validation: bool,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ai_games::Entity",
        from = "Column::GameId",
        to = "super::ai_games::Column::Id"
    )]
    Game,
    #[sea_orm(has_many = "super::instruction_steps::Entity")]
    InstructionSteps,
}

impl Related<super::ai_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::instruction_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstructionSteps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
