use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit (production)
    CommitOnOk,
    /// Roll back so test data never persists
    RollbackOnOk,
}

impl TxnPolicy {
    /// `"commit"` selects `CommitOnOk`; anything else rolls back.
    pub fn from_test_setting(value: &str) -> Self {
        if value.eq_ignore_ascii_case("commit") {
            TxnPolicy::CommitOnOk
        } else {
            TxnPolicy::RollbackOnOk
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current policy; `CommitOnOk` until something sets it.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the process-wide policy. Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
