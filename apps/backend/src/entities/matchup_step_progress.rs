use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matchup_step_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "matchup_id")]
    pub matchup_id: i64,
    #[sea_orm(column_name = "step_id")]
    pub step_id: i64,
    #[sea_orm(column_name = "is_completed")]
    pub is_completed: bool,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_by")]
    pub completed_by: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_matchups::Entity",
        from = "Column::MatchupId",
        to = "super::game_matchups::Column::Id"
    )]
    Matchup,
    #[sea_orm(
        belongs_to = "super::game_steps::Entity",
        from = "Column::StepId",
        to = "super::game_steps::Column::Id"
    )]
    Step,
}

impl Related<super::game_matchups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matchup.def()
    }
}

impl Related<super::game_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Step.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
