//! SeaORM adapter for teams and team memberships.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::team_memberships::{self, MembershipRole};
use crate::entities::{teams, users};

pub mod dto;

pub use dto::{TeamCreate, TeamUpdate};

pub async fn create_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TeamCreate,
) -> Result<teams::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    teams::ActiveModel {
        id: NotSet,
        school_id: Set(dto.school_id),
        name: Set(dto.name),
        description: Set(dto.description),
        is_active: Set(true),
        created_by: Set(dto.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

/// Active teams of one school, by name.
pub async fn list_active_for_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .filter(teams::Column::SchoolId.eq(school_id))
        .filter(teams::Column::IsActive.eq(true))
        .order_by_asc(teams::Column::Name)
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

/// Apply the set fields of `dto`; unset fields keep their value.
pub async fn update_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team: teams::Model,
    dto: TeamUpdate,
) -> Result<teams::Model, sea_orm::DbErr> {
    let mut active: teams::ActiveModel = team.into();
    if let Some(name) = dto.name {
        active.name = Set(name);
    }
    if let Some(description) = dto.description {
        active.description = Set(description);
    }
    if let Some(is_active) = dto.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(conn).await
}

/// Hard delete; memberships and matchups go with it through `ON DELETE CASCADE`.
pub async fn delete_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = teams::Entity::delete_by_id(team_id).exec(conn).await?;
    Ok(res.rows_affected)
}

/// Add `user_id` to `team_id`; a repeated add is a no-op.
pub async fn add_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
    role: MembershipRole,
) -> Result<(), sea_orm::DbErr> {
    let membership = team_memberships::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        user_id: Set(user_id),
        role: Set(role),
        joined_at: Set(time::OffsetDateTime::now_utc()),
    };

    team_memberships::Entity::insert(membership)
        .on_conflict(
            OnConflict::columns([
                team_memberships::Column::TeamId,
                team_memberships::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = team_memberships::Entity::find()
        .filter(team_memberships::Column::TeamId.eq(team_id))
        .filter(team_memberships::Column::UserId.eq(user_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn team_ids_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    team_memberships::Entity::find()
        .select_only()
        .column(team_memberships::Column::TeamId)
        .filter(team_memberships::Column::UserId.eq(user_id))
        .into_tuple()
        .all(conn)
        .await
}

pub async fn remove_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = team_memberships::Entity::delete_many()
        .filter(team_memberships::Column::TeamId.eq(team_id))
        .filter(team_memberships::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Roster of a team with each member's user row, in join order.
pub async fn list_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<(team_memberships::Model, users::Model)>, sea_orm::DbErr> {
    let rows = team_memberships::Entity::find()
        .filter(team_memberships::Column::TeamId.eq(team_id))
        .find_also_related(users::Entity)
        .order_by_asc(team_memberships::Column::JoinedAt)
        .order_by_asc(team_memberships::Column::Id)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(membership, user)| user.map(|user| (membership, user)))
        .collect())
}
