use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A transaction injected into request extensions so that a test (or an
/// outer caller) owns its lifecycle while handlers and extractors share it.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a transaction on `db` and wrap it.
    pub async fn open(db: &DatabaseConnection) -> Result<Self, AppError> {
        let txn = db.begin().await?;
        Ok(Self(Arc::new(txn)))
    }

    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Roll back. Fails if another clone is still alive (e.g. a request
    /// whose extensions have not been dropped yet).
    pub async fn rollback(self) -> Result<(), AppError> {
        let txn = Arc::try_unwrap(self.0)
            .map_err(|_| AppError::internal("shared transaction still referenced at rollback"))?;
        txn.rollback().await?;
        Ok(())
    }

    /// Commit, with the same ownership rule as `rollback`.
    pub async fn commit(self) -> Result<(), AppError> {
        let txn = Arc::try_unwrap(self.0)
            .map_err(|_| AppError::internal("shared transaction still referenced at commit"))?;
        txn.commit().await?;
        Ok(())
    }
}

/// Run `f` inside a database transaction.
///
/// 1) A `SharedTxn` in request extensions is used as-is (no commit/rollback here).
/// 2) Otherwise begin a transaction, run `f`, apply the txn policy on `Ok`,
///    and roll back on `Err`.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(
        &'a DatabaseTransaction,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<R, AppError>> + 'a>>,
{
    // Clone out of extensions before awaiting so no RefCell borrow is held.
    if let Some(shared) = req.and_then(SharedTxn::from_req) {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => txn.commit().await?,
                txn_policy::TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; keep the original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
