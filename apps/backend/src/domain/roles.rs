use std::fmt;

use serde::{Deserialize, Serialize};

/// Actor role as seen by the progression and access rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// Teachers and admins manage matchups and bypass the step gate.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }

    pub fn instruction_audience(self) -> Audience {
        if self.is_staff() {
            Audience::Teacher
        } else {
            Audience::Student
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
        })
    }
}

/// Which instruction chain a reader gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    Student,
    Teacher,
}

/// The acting user, reduced to what access rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
    pub school_id: Option<i64>,
}

/// Staff manage matchups of their own school and the ones they created.
/// Admin rights do not cross school boundaries. Students never manage.
pub fn can_manage_matchup(actor: &Actor, school_id: i64, created_by: Option<i64>) -> bool {
    actor.role.is_staff()
        && (actor.school_id == Some(school_id) || created_by == Some(actor.user_id))
}
