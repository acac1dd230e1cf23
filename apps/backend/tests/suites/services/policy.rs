use backend::adapters::catalog_sea::{GameCreate, StepCreate};
use backend::adapters::matchups_sea::MatchupCreate;
use backend::db::txn::with_txn;
use backend::domain::CurrentStepPolicy;
use backend::repos::{catalog, matchups};
use backend::services::progression::ProgressionService;
use backend::AppError;
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;
use crate::support::factory::seed_classroom;

#[tokio::test]
async fn out_of_order_completion_under_each_policy() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_classroom(txn, &[false, false, false, false]).await?;
            let first_incomplete = ProgressionService::new(CurrentStepPolicy::FirstIncomplete);
            let legacy = ProgressionService::new(CurrentStepPolicy::AfterHighestCompleted);

            for n in [1, 3] {
                first_incomplete
                    .complete_step(txn, &c.matchup, n, Some(c.teacher.id))
                    .await?;
            }

            let current = first_incomplete.current_step(txn, &c.matchup).await?;
            assert_eq!(current.map(|s| s.step_number), Some(2));
            let current = legacy.current_step(txn, &c.matchup).await?;
            assert_eq!(current.map(|s| s.step_number), Some(4));

            // Completing the last step out of order: the legacy policy runs
            // off the end while step 2 is still open.
            first_incomplete
                .complete_step(txn, &c.matchup, 4, Some(c.teacher.id))
                .await?;
            assert!(legacy.current_step(txn, &c.matchup).await?.is_none());
            let current = first_incomplete.current_step(txn, &c.matchup).await?;
            assert_eq!(current.map(|s| s.step_number), Some(2));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn policies_agree_when_completed_in_order() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_classroom(txn, &[false, false, false]).await?;
            let first_incomplete = ProgressionService::new(CurrentStepPolicy::FirstIncomplete);
            let legacy = ProgressionService::new(CurrentStepPolicy::AfterHighestCompleted);

            for n in 1..=3 {
                let a = first_incomplete.current_step(txn, &c.matchup).await?;
                let b = legacy.current_step(txn, &c.matchup).await?;
                assert_eq!(a, b);
                assert_eq!(a.map(|s| s.step_number), Some(n));
                first_incomplete
                    .complete_step(txn, &c.matchup, n, None)
                    .await?;
            }
            assert!(first_incomplete.current_step(txn, &c.matchup).await?.is_none());
            assert!(legacy.current_step(txn, &c.matchup).await?.is_none());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn inactive_steps_are_invisible() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_classroom(txn, &[false]).await?;
            let game = catalog::create_game(txn, GameCreate::new(unique_str("game"))).await?;
            catalog::create_step(txn, StepCreate::new(game.id, 1, "One")).await?;
            catalog::create_step(txn, StepCreate::new(game.id, 2, "Two").inactive()).await?;
            catalog::create_step(txn, StepCreate::new(game.id, 3, "Three")).await?;
            let matchup = matchups::create_matchup(
                txn,
                MatchupCreate::new(game.id, c.team1.id, c.team2.id, c.school_id),
            )
            .await?;

            let service = ProgressionService::default();
            service.complete_step(txn, &matchup, 1, None).await?;

            let current = service.current_step(txn, &matchup).await?;
            assert_eq!(current.map(|s| s.step_number), Some(3));
            assert!(service
                .complete_step(txn, &matchup, 2, None)
                .await
                .is_err());
            Ok(())
        })
    })
    .await
}
