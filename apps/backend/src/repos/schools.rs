use sea_orm::ConnectionTrait;

use crate::adapters::schools_sea;
use crate::entities::schools;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct School {
    pub id: i64,
    pub name: String,
}

pub async fn create_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<School, DomainError> {
    Ok(School::from(schools_sea::create_school(conn, name).await?))
}

pub async fn find_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Option<School>, DomainError> {
    Ok(schools_sea::find_school(conn, school_id).await?.map(School::from))
}

pub async fn require_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<School, DomainError> {
    find_school(conn, school_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::School, format!("School {school_id} not found"))
    })
}

impl From<schools::Model> for School {
    fn from(model: schools::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
