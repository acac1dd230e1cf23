use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_steps::Entity")]
    GameSteps,
    #[sea_orm(has_many = "super::game_matchups::Entity")]
    GameMatchups,
}

impl Related<super::game_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameSteps.def()
    }
}

impl Related<super::game_matchups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameMatchups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
