//! DTOs for users_sea adapter.

use crate::entities::users::UserRole;

/// DTO for creating a user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub sub: String,
    pub username: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub school_id: Option<i64>,
}

impl UserCreate {
    pub fn new(sub: impl Into<String>, username: impl Into<String>, role: UserRole) -> Self {
        Self {
            sub: sub.into(),
            username: username.into(),
            email: None,
            role,
            school_id: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_school(mut self, school_id: i64) -> Self {
        self.school_id = Some(school_id);
        self
    }
}
