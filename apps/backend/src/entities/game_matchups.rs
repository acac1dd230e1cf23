use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchupStatus {
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_matchups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "team1_id")]
    pub team1_id: i64,
    #[sea_orm(column_name = "team2_id")]
    pub team2_id: i64,
    #[sea_orm(column_name = "school_id")]
    pub school_id: i64,
    #[sea_orm(column_name = "created_by")]
    pub created_by: Option<i64>,
    pub status: MatchupStatus,
    #[sea_orm(column_name = "scheduled_date")]
    pub scheduled_date: Option<OffsetDateTime>,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    pub notes: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ai_games::Entity",
        from = "Column::GameId",
        to = "super::ai_games::Column::Id"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::Team1Id",
        to = "super::teams::Column::Id"
    )]
    Team1,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::Team2Id",
        to = "super::teams::Column::Id"
    )]
    Team2,
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(has_many = "super::matchup_step_progress::Entity")]
    StepProgress,
    #[sea_orm(has_many = "super::team_step_validations::Entity")]
    TeamValidations,
}

impl Related<super::ai_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::matchup_step_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StepProgress.def()
    }
}

impl Related<super::team_step_validations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamValidations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
