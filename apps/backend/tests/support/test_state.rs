use std::env;

use backend::config::db::{DbKind, RuntimeEnv};
use backend::infra::state::{build_state, StateBuilder};
use backend::state::app_state::AppState;
use backend::AppError;

/// `CLASSROOM_TEST_DB_KIND`, defaulting to a fresh in-memory SQLite database
/// per state so tests never see each other's rows.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    DbKind::from_env("CLASSROOM_TEST_DB_KIND", DbKind::SqliteMemory)
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    Ok(build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(resolve_test_db_kind()?))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}
