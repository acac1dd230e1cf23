//! JWT helpers for route tests.

use std::time::{Duration, SystemTime};

use backend::auth::jwt::mint_access_token;
use backend::state::security_config::SecurityConfig;

pub fn mint_test_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    mint_access_token(sub, email, SystemTime::now(), sec).expect("should mint token")
}

/// Full `Authorization` header value.
pub fn bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sub, email, sec))
}

pub fn expired_bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    let past = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
    let token = mint_access_token(sub, email, past, sec).expect("should mint expired token");
    format!("Bearer {token}")
}
