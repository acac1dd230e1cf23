//! SeaORM adapter for matchups.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::game_matchups::{self, MatchupStatus};

pub mod dto;

pub use dto::{MatchupCreate, MatchupStatusUpdate};

pub async fn create_matchup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchupCreate,
) -> Result<game_matchups::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    game_matchups::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        team1_id: Set(dto.team1_id),
        team2_id: Set(dto.team2_id),
        school_id: Set(dto.school_id),
        created_by: Set(dto.created_by),
        status: Set(MatchupStatus::Scheduled),
        scheduled_date: Set(dto.scheduled_date),
        started_at: Set(None),
        completed_at: Set(None),
        notes: Set(dto.notes),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    matchup_id: i64,
) -> Result<Option<game_matchups::Model>, sea_orm::DbErr> {
    game_matchups::Entity::find_by_id(matchup_id).one(conn).await
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchupStatusUpdate,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_matchups::Entity::update_many()
        .col_expr(game_matchups::Column::Status, Expr::value(dto.status))
        .col_expr(game_matchups::Column::StartedAt, Expr::value(dto.started_at))
        .col_expr(
            game_matchups::Column::CompletedAt,
            Expr::value(dto.completed_at),
        )
        .col_expr(
            game_matchups::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(game_matchups::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn list_for_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Vec<game_matchups::Model>, sea_orm::DbErr> {
    game_matchups::Entity::find()
        .filter(game_matchups::Column::SchoolId.eq(school_id))
        .order_by_desc(game_matchups::Column::CreatedAt)
        .order_by_desc(game_matchups::Column::Id)
        .all(conn)
        .await
}

/// Matchups of `school_id` plus any created by `user_id`.
pub async fn list_managed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: Option<i64>,
    user_id: i64,
) -> Result<Vec<game_matchups::Model>, sea_orm::DbErr> {
    let scope = Condition::any()
        .add_option(school_id.map(|id| game_matchups::Column::SchoolId.eq(id)))
        .add(game_matchups::Column::CreatedBy.eq(user_id));
    game_matchups::Entity::find()
        .filter(scope)
        .order_by_desc(game_matchups::Column::CreatedAt)
        .order_by_desc(game_matchups::Column::Id)
        .all(conn)
        .await
}

/// Matchups where either side is one of `team_ids`.
pub async fn list_for_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_ids: &[i64],
) -> Result<Vec<game_matchups::Model>, sea_orm::DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    game_matchups::Entity::find()
        .filter(
            game_matchups::Column::Team1Id
                .is_in(team_ids.iter().copied())
                .or(game_matchups::Column::Team2Id.is_in(team_ids.iter().copied())),
        )
        .order_by_desc(game_matchups::Column::CreatedAt)
        .order_by_desc(game_matchups::Column::Id)
        .all(conn)
        .await
}
