//! Connection bootstrap: connect, apply per-engine settings, migrate.

use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{db_url, sanitize_db_url, sqlite_dir, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(url: String, kind: DbKind) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .acquire_timeout(Duration::from_secs(5));

    match kind {
        // An in-memory database lives and dies with its connection, so the
        // pool holds exactly one and never recycles it.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4);
        }
        DbKind::Postgres => {
            opts.max_connections(10).min_connections(1);
        }
    }
    opts
}

/// Open a pool for `(env, kind, owner)` without running migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, kind, owner)?;

    if kind == DbKind::SqliteFile {
        std::fs::create_dir_all(sqlite_dir()).map_err(|e| {
            AppError::config(format!("cannot create SQLite directory: {e}"))
        })?;
    }

    info!(db = %sanitize_db_url(&url), ?env, ?kind, "connecting to database");

    let conn = retry_connection(
        || {
            let opts = connect_options(url.clone(), kind);
            async move {
                Database::connect(opts)
                    .await
                    .map_err(|e| AppError::db(format!("failed to connect: {e}")))
            }
        },
        if kind == DbKind::Postgres {
            CONNECT_ATTEMPTS
        } else {
            1
        },
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    if kind.is_sqlite() {
        conn.execute(Statement::from_string(
            conn.get_database_backend(),
            "PRAGMA foreign_keys = ON;".to_string(),
        ))
        .await?;
    }

    Ok(conn)
}

/// Single entry point used by the server, the admin CLI and tests:
/// connect as the app user and bring the schema up to date.
///
/// On Postgres, migrations run over a short-lived owner connection. SQLite
/// migrates over the returned pool (the only option for in-memory).
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    match kind {
        DbKind::Postgres => {
            let owner = connect_db(env, kind, DbOwner::Owner).await?;
            migrate(&owner, MigrationCommand::Up).await?;
            owner.close().await?;
            connect_db(env, kind, DbOwner::App).await
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let conn = connect_db(env, kind, DbOwner::App).await?;
            migrate(&conn, MigrationCommand::Up).await?;
            Ok(conn)
        }
    }
}
