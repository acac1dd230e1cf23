use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_step_validations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "matchup_id")]
    pub matchup_id: i64,
    #[sea_orm(column_name = "team_id")]
    pub team_id: i64,
    #[sea_orm(column_name = "step_id")]
    pub step_id: i64,
    #[sea_orm(column_name = "is_validated")]
    pub is_validated: bool,
    #[sea_orm(column_name = "validated_by")]
    pub validated_by: Option<i64>,
    #[sea_orm(column_name = "validated_at")]
    pub validated_at: Option<OffsetDateTime>,
    pub notes: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
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
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id"
    )]
    Team,
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
