use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};

use crate::entities::schools;

pub async fn create_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<schools::Model, sea_orm::DbErr> {
    schools::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn find_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Option<schools::Model>, sea_orm::DbErr> {
    schools::Entity::find_by_id(school_id).one(conn).await
}
