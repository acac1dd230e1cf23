use std::env;

use crate::config::db::DbKind;
use crate::domain::progression::CurrentStepPolicy;
use crate::error::AppError;

/// Settings the server binary reads once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: Vec<u8>,
    pub db_kind: DbKind,
    pub current_step_policy: CurrentStepPolicy,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => 3001,
        };
        let jwt_secret = env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set"))?
            .into_bytes();

        Ok(Self {
            host,
            port,
            jwt_secret,
            db_kind: DbKind::from_env("CLASSROOM_DB_KIND", DbKind::Postgres)?,
            current_step_policy: current_step_policy_from_env()?,
        })
    }
}

/// `CLASSROOM_CURRENT_STEP_POLICY`, defaulting to first-incomplete.
pub fn current_step_policy_from_env() -> Result<CurrentStepPolicy, AppError> {
    match env::var("CLASSROOM_CURRENT_STEP_POLICY") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map_err(|e: String| AppError::config(e)),
        _ => Ok(CurrentStepPolicy::default()),
    }
}
