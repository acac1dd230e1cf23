use crate::config::db::{DbKind, RuntimeEnv};
use crate::domain::progression::CurrentStepPolicy;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main`, the admin CLI and tests.
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    security_config: SecurityConfig,
    current_step_policy: CurrentStepPolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            security_config: SecurityConfig::default(),
            current_step_policy: CurrentStepPolicy::default(),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_current_step_policy(mut self, policy: CurrentStepPolicy) -> Self {
        self.current_step_policy = policy;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(self.env, kind).await?;
                AppState::new(conn, self.security_config)
            }
            None => AppState::new_without_db(self.security_config),
        };
        Ok(state.with_current_step_policy(self.current_step_policy))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
