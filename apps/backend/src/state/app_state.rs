use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::domain::progression::CurrentStepPolicy;

/// Shared resources handed to every request via `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in a few configuration tests)
    db: Option<DatabaseConnection>,
    /// JWT settings
    pub security: SecurityConfig,
    /// How the matchup's current step is derived
    pub current_step_policy: CurrentStepPolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            current_step_policy: CurrentStepPolicy::default(),
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            current_step_policy: CurrentStepPolicy::default(),
        }
    }

    pub fn with_current_step_policy(mut self, policy: CurrentStepPolicy) -> Self {
        self.current_step_policy = policy;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
