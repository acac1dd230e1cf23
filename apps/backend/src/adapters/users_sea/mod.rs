//! SeaORM adapter for users.

use sea_orm::sea_query::OnConflict;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::users::{self, UserRole};

pub mod dto;

pub use dto::UserCreate;

fn active_model(dto: UserCreate) -> users::ActiveModel {
    let now = time::OffsetDateTime::now_utc();
    users::ActiveModel {
        id: NotSet,
        sub: Set(dto.sub),
        username: Set(dto.username),
        email: Set(dto.email),
        role: Set(dto.role),
        school_id: Set(dto.school_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    active_model(dto).insert(conn).await
}

/// Insert unless `sub` exists; returns the row and whether it was inserted.
pub async fn ensure_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let sub = dto.sub.clone();

    let rows = users::Entity::insert(active_model(dto))
        .on_conflict(
            OnConflict::column(users::Column::Sub)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let user = find_user_by_sub(conn, &sub)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.sub not found".to_string()))?;

    Ok((user, rows == 1))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
}

/// Users attached to a school, by username.
pub async fn list_for_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::SchoolId.eq(school_id))
        .order_by_asc(users::Column::Username)
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

pub async fn find_users_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids.iter().copied()))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

/// Set `role` on every id in `user_ids`; returns the number of rows touched.
pub async fn set_role_for_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
    role: UserRole,
) -> Result<u64, sea_orm::DbErr> {
    let res = users::Entity::update_many()
        .col_expr(users::Column::Role, Expr::value(role))
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(users::Column::Id.is_in(user_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
