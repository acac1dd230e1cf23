//! Domain layer: pure progression and matchup rules, no I/O.

pub mod feedback;
pub mod instructions;
pub mod matchup;
pub mod progression;
pub mod roles;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_progression;

pub use progression::{CurrentStepPolicy, StepState};
pub use roles::Role;
