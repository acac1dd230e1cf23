use backend::db::txn::with_txn;
use backend::repos::step_progress;
use backend::services::progression::ProgressionService;
use backend::{AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::factory::{seed_classroom, seed_three_step_classroom};

#[tokio::test]
async fn reset_step_progress_reopens_the_step() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = ProgressionService::default();

            assert!(!service.reset_step_progress(txn, &c.matchup, 1).await?);

            service
                .complete_step(txn, &c.matchup, 1, Some(c.teacher.id))
                .await?;
            assert!(service.reset_step_progress(txn, &c.matchup, 1).await?);

            let row = service
                .get_progress_for_step(txn, &c.matchup, 1)
                .await?
                .expect("row survives the reset");
            assert!(!row.is_completed);
            assert!(row.completed_at.is_none());
            assert!(row.completed_by.is_none());

            let current = service.current_step(txn, &c.matchup).await?;
            assert_eq!(current.map(|s| s.step_number), Some(1));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn reset_team_validations_counts_rows() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = ProgressionService::default();

            for team_id in [c.team1.id, c.team2.id] {
                service
                    .validate_team_step(txn, &c.matchup, team_id, 2, c.teacher.id)
                    .await?;
            }

            let count = service
                .reset_team_validations(txn, &c.matchup, 2, Some(c.team1.id))
                .await?;
            assert_eq!(count, 1);
            assert!(!service.is_team_validated(txn, &c.matchup, c.team1.id, 2).await?);
            assert!(service.is_team_validated(txn, &c.matchup, c.team2.id, 2).await?);

            let count = service
                .reset_team_validations(txn, &c.matchup, 2, None)
                .await?;
            assert_eq!(count, 2);
            assert!(!service.is_team_validated(txn, &c.matchup, c.team2.id, 2).await?);

            let err = service
                .reset_team_validations(txn, &c.matchup, 2, Some(c.team1.id + c.team2.id + 1000))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidTeamForMatchup);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn reconcile_completes_only_dual_validated_steps() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            // Steps 2 and 3 need validation.
            let c = seed_classroom(txn, &[false, true, true]).await?;
            let service = ProgressionService::default();

            for team_id in [c.team1.id, c.team2.id] {
                service
                    .validate_team_step(txn, &c.matchup, team_id, 2, c.teacher.id)
                    .await?;
            }
            service
                .validate_team_step(txn, &c.matchup, c.team1.id, 3, c.teacher.id)
                .await?;

            // Break the invariant the way a manual edit would.
            service.reset_step_progress(txn, &c.matchup, 2).await?;

            let fixed = service.reconcile_validation_steps(txn, &c.matchup).await?;
            assert_eq!(fixed, vec![2]);

            let row = step_progress::find(txn, c.matchup.id, c.step(2).id)
                .await?
                .expect("row should exist");
            assert!(row.is_completed);
            assert_eq!(row.completed_by, Some(c.teacher.id));

            let step3 = step_progress::find(txn, c.matchup.id, c.step(3).id).await?;
            assert!(step3.map_or(true, |p| !p.is_completed));

            assert!(service
                .reconcile_validation_steps(txn, &c.matchup)
                .await?
                .is_empty());
            Ok(())
        })
    })
    .await
}
