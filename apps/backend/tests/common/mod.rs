#![allow(dead_code)]

use backend::db::txn_policy::{set_txn_policy, TxnPolicy};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Rolls back by default; `CLASSROOM_TXN_POLICY=commit` keeps the data for
// debugging a single binary.
#[ctor::ctor]
fn init_txn_policy() {
    let raw = std::env::var("CLASSROOM_TXN_POLICY").unwrap_or_default();
    set_txn_policy(TxnPolicy::from_test_setting(&raw));
}
