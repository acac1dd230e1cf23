//! Services: orchestrate repos and pure domain rules inside one transaction.

pub mod access;
pub mod authoring;
pub mod catalog;
pub mod feedback;
pub mod matchups;
pub mod progression;
pub mod teams;
pub mod users;
