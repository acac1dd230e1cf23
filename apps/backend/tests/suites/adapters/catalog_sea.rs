use backend::adapters::catalog_sea::{GameCreate, StepCreate};
use backend::db::txn::with_txn;
use backend::repos::catalog;
use backend::{AppError, ErrorCode};
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;

#[tokio::test]
async fn active_steps_are_ordered_and_filtered() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let game = catalog::create_game(txn, GameCreate::new(unique_str("game"))).await?;
            // Inserted out of order on purpose.
            for (n, active) in [(3, true), (1, true), (2, false)] {
                let mut dto = StepCreate::new(game.id, n, format!("Step {n}"));
                if !active {
                    dto = dto.inactive();
                }
                catalog::create_step(txn, dto).await?;
            }

            let steps = catalog::active_steps(txn, game.id).await?;
            let numbers: Vec<i32> = steps.iter().map(|s| s.step_number).collect();
            assert_eq!(numbers, vec![1, 3]);

            assert!(catalog::find_active_step(txn, game.id, 2).await?.is_none());
            let err = catalog::require_active_step(txn, game.id, 2).await.unwrap_err();
            assert_eq!(AppError::from(err).code(), ErrorCode::StepNotFound);
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn inactive_games_are_not_listed() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let live = catalog::create_game(txn, GameCreate::new(unique_str("live"))).await?;
            let retired =
                catalog::create_game(txn, GameCreate::new(unique_str("retired")).inactive())
                    .await?;

            let ids: Vec<i64> = catalog::list_active_games(txn)
                .await?
                .into_iter()
                .map(|g| g.id)
                .collect();
            assert!(ids.contains(&live.id));
            assert!(!ids.contains(&retired.id));
            assert!(!catalog::require_game(txn, retired.id).await?.is_active);
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_step_number_is_a_unique_violation() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let game = catalog::create_game(txn, GameCreate::new(unique_str("game"))).await?;
            catalog::create_step(txn, StepCreate::new(game.id, 1, "First")).await?;

            // Last statement in the transaction: Postgres aborts it on error.
            let err = catalog::create_step(txn, StepCreate::new(game.id, 1, "Again"))
                .await
                .unwrap_err();
            assert_eq!(AppError::from(err).code(), ErrorCode::UniqueViolation);
            Ok::<_, AppError>(())
        })
    })
    .await
}
