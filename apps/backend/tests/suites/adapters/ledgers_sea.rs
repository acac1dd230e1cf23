use backend::adapters::{step_progress_sea, team_validations_sea};
use backend::db::txn::with_txn;
use backend::repos::{step_progress, team_validations};
use backend::AppError;
use time::OffsetDateTime;

use crate::support::build_test_state;
use crate::support::factory::seed_three_step_classroom;

#[tokio::test]
async fn progress_get_or_create_inserts_once() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let step_id = c.step(1).id;

            let (first, inserted) =
                step_progress_sea::get_or_create(txn, c.matchup.id, step_id).await?;
            assert!(inserted);
            assert!(!first.is_completed);
            assert!(first.started_at.is_some());

            let (again, inserted) =
                step_progress_sea::get_or_create(txn, c.matchup.id, step_id).await?;
            assert!(!inserted);
            assert_eq!(again.id, first.id);

            let rows = step_progress_sea::list_for_matchup(txn, c.matchup.id).await?;
            assert_eq!(rows.len(), 1);
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn mark_completed_only_flips_incomplete_rows() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let step_id = c.step(1).id;
            step_progress::get_or_create(txn, c.matchup.id, step_id).await?;

            let now = OffsetDateTime::now_utc();
            assert!(
                step_progress::mark_completed(txn, c.matchup.id, step_id, Some(c.teacher.id), now)
                    .await?
            );
            let first = step_progress::find(txn, c.matchup.id, step_id)
                .await?
                .expect("row exists");

            let later = now + time::Duration::minutes(5);
            assert!(
                !step_progress::mark_completed(txn, c.matchup.id, step_id, Some(c.student1.id), later)
                    .await?
            );
            let second = step_progress::find(txn, c.matchup.id, step_id)
                .await?
                .expect("row exists");
            assert_eq!(second.completed_at, first.completed_at);
            assert_eq!(second.completed_by, Some(c.teacher.id));

            // Nothing to flip when no row exists.
            assert!(
                !step_progress::mark_completed(txn, c.matchup.id, c.step(3).id, None, now).await?
            );
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn validation_rows_are_keyed_per_team() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let step_id = c.step(2).id;

            let (row1, inserted) =
                team_validations_sea::get_or_create(txn, c.matchup.id, c.team1.id, step_id).await?;
            assert!(inserted);
            let (row2, inserted) =
                team_validations_sea::get_or_create(txn, c.matchup.id, c.team2.id, step_id).await?;
            assert!(inserted);
            assert_ne!(row1.id, row2.id);

            let now = OffsetDateTime::now_utc();
            assert!(
                team_validations::mark_validated(
                    txn,
                    c.matchup.id,
                    c.team1.id,
                    step_id,
                    Some(c.teacher.id),
                    now
                )
                .await?
            );
            assert!(
                !team_validations::mark_validated(txn, c.matchup.id, c.team1.id, step_id, None, now)
                    .await?
            );

            let team1 = team_validations::find(txn, c.matchup.id, c.team1.id, step_id)
                .await?
                .expect("row exists");
            assert!(team1.is_validated);
            assert_eq!(team1.validated_by, Some(c.teacher.id));

            let team2 = team_validations::find(txn, c.matchup.id, c.team2.id, step_id)
                .await?
                .expect("row exists");
            assert!(!team2.is_validated);

            assert_eq!(team_validations::reset(txn, c.matchup.id, step_id, None).await?, 2);
            let team1 = team_validations::find(txn, c.matchup.id, c.team1.id, step_id)
                .await?
                .expect("row survives reset");
            assert!(!team1.is_validated);
            assert!(team1.validated_at.is_none());
            Ok::<_, AppError>(())
        })
    })
    .await
}
