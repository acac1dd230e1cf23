// Proptest generators for progression inputs.

use proptest::prelude::*;

use crate::domain::StepState;

/// Active step numbers: 1..=12 distinct values, possibly with gaps.
pub fn step_numbers() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::btree_set(1i32..=20, 1..=12).prop_map(|s| s.into_iter().collect())
}

/// Active steps with arbitrary completion flags.
pub fn step_states() -> impl Strategy<Value = Vec<StepState>> {
    step_numbers().prop_flat_map(|numbers| {
        let len = numbers.len();
        prop::collection::vec(any::<bool>(), len).prop_map(move |flags| {
            numbers
                .iter()
                .zip(flags)
                .map(|(&n, c)| StepState::new(n, c))
                .collect()
        })
    })
}

/// Steps numbered 1..=len where the completed ones form a prefix.
pub fn prefix_completed_states() -> impl Strategy<Value = Vec<StepState>> {
    (1i32..=12)
        .prop_flat_map(|len| (Just(len), 0..=len))
        .prop_map(|(len, k)| (1..=len).map(|n| StepState::new(n, n <= k)).collect())
}
