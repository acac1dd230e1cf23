//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::users_sea as users_adapter;
use crate::adapters::users_sea::UserCreate;
use crate::domain::roles::{Actor, Role};
use crate::entities::users::{self, UserRole};
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub sub: String,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
    pub school_id: Option<i64>,
}

impl User {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
            school_id: self.school_id,
        }
    }
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

/// Get-or-create by `sub`; the flag is true when a row was inserted.
pub async fn ensure_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<(User, bool), DomainError> {
    let (user, inserted) = users_adapter::ensure_user_by_sub(conn, dto).await?;
    Ok((User::from(user), inserted))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_sub(conn, sub).await?;
    Ok(user.map(User::from))
}

/// Users attached to `school_id`, by username.
pub async fn list_for_school<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    school_id: i64,
) -> Result<Vec<User>, DomainError> {
    let rows = users_adapter::list_for_school(conn, school_id).await?;
    Ok(rows.into_iter().map(User::from).collect())
}

pub async fn find_users_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<User>, DomainError> {
    let rows = users_adapter::find_users_by_ids(conn, user_ids).await?;
    Ok(rows.into_iter().map(User::from).collect())
}

/// Returns how many rows changed.
pub async fn set_role_for_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
    role: Role,
) -> Result<u64, DomainError> {
    Ok(users_adapter::set_role_for_users(conn, user_ids, role.into()).await?)
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Student => Role::Student,
            UserRole::Teacher => Role::Teacher,
            UserRole::Admin => Role::Admin,
        }
    }
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => UserRole::Student,
            Role::Teacher => UserRole::Teacher,
            Role::Admin => UserRole::Admin,
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            sub: model.sub,
            username: model.username,
            email: model.email,
            role: model.role.into(),
            school_id: model.school_id,
        }
    }
}
