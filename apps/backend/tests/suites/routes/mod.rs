pub mod auth;
pub mod games;
pub mod healthcheck;
pub mod instructions;
pub mod matchups;
pub mod users;
