//! Test support shared by the backend's unit and integration tests.
//!
//! Logging bootstrap, unique fixture data, and assertions for the
//! Problem Details error contract.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
