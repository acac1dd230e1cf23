//! School rosters and role assignment, for admins.

use std::collections::BTreeSet;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::domain::roles::{Actor, Role};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::users::{self, User};
use crate::services::access;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleChange {
    pub role: Role,
    pub updated_count: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Users of the admin's school, by username.
    pub async fn list_school_users<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
    ) -> Result<Vec<User>, AppError> {
        access::require_admin(actor)?;
        match actor.school_id {
            Some(school_id) => Ok(users::list_for_school(conn, school_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Give every listed user `role`. All of them must belong to the admin's
    /// school; users elsewhere read as missing and nothing changes.
    pub async fn set_roles<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
        user_ids: &[i64],
        role: Role,
    ) -> Result<RoleChange, AppError> {
        access::require_admin(actor)?;

        let wanted: BTreeSet<i64> = user_ids.iter().copied().collect();
        if wanted.is_empty() {
            return Err(DomainError::validation_other("Select at least one user").into());
        }
        let ids: Vec<i64> = wanted.into_iter().collect();

        let found = users::find_users_by_ids(conn, &ids).await?;
        for id in &ids {
            let in_school = found
                .iter()
                .any(|u| u.id == *id && u.school_id.is_some() && u.school_id == actor.school_id);
            if !in_school {
                return Err(
                    DomainError::not_found(NotFoundKind::User, format!("User {id} not found"))
                        .into(),
                );
            }
        }

        let updated_count = users::set_role_for_users(conn, &ids, role).await?;
        info!(
            admin_id = actor.user_id,
            role = %role,
            updated_count,
            "User roles updated"
        );
        Ok(RoleChange {
            role,
            updated_count,
        })
    }
}
