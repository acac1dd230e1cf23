//! Property tests for current-step derivation (pure domain, no DB).
//!
//! Properties tested:
//! - First-incomplete never lands on a completed step
//! - First-incomplete is terminal exactly when every step is completed
//! - Both policies agree on in-order completion of steps numbered from 1
//! - The current step is always accessible under first-incomplete

use proptest::prelude::*;

use crate::domain::progression::{current_step_number, is_step_accessible, skipped_steps};
use crate::domain::{test_gens, test_prelude, CurrentStepPolicy};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_first_incomplete_is_never_completed(steps in test_gens::step_states()) {
        if let Some(n) = current_step_number(CurrentStepPolicy::FirstIncomplete, &steps) {
            let state = steps.iter().find(|s| s.step_number == n);
            prop_assert!(matches!(state, Some(s) if !s.is_completed));
        }
    }

    #[test]
    fn prop_first_incomplete_terminal_iff_all_done(steps in test_gens::step_states()) {
        let all_done = steps.iter().all(|s| s.is_completed);
        let current = current_step_number(CurrentStepPolicy::FirstIncomplete, &steps);
        prop_assert_eq!(current.is_none(), all_done);
    }

    #[test]
    fn prop_first_incomplete_has_no_skipped_steps(steps in test_gens::step_states()) {
        let current = current_step_number(CurrentStepPolicy::FirstIncomplete, &steps);
        if current.is_some() {
            prop_assert!(skipped_steps(&steps, current).is_empty());
        }
    }

    #[test]
    fn prop_current_step_is_accessible(steps in test_gens::step_states()) {
        if let Some(n) = current_step_number(CurrentStepPolicy::FirstIncomplete, &steps) {
            prop_assert!(is_step_accessible(&steps, n));
        }
    }

    #[test]
    fn prop_policies_agree_on_contiguous_prefix(steps in test_gens::prefix_completed_states()) {
        prop_assert_eq!(
            current_step_number(CurrentStepPolicy::FirstIncomplete, &steps),
            current_step_number(CurrentStepPolicy::AfterHighestCompleted, &steps)
        );
    }
}
