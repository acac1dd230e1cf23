use backend::adapters::catalog_sea::GameCreate;
use backend::db::txn::with_txn;
use backend::domain::matchup::MatchupStatus;
use backend::entities::users::UserRole;
use backend::repos::{catalog, schools};
use backend::services::access;
use backend::services::matchups::{MatchupService, NewMatchup};
use backend::services::progression::ProgressionService;
use backend::{AppError, ErrorCode};
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;
use crate::support::factory::{
    create_team_with_member, create_user, seed_classroom, seed_three_step_classroom,
};

fn new_matchup(game_id: i64, team1_id: i64, team2_id: i64) -> NewMatchup {
    NewMatchup {
        game_id,
        team1_id,
        team2_id,
        scheduled_date: None,
        notes: Some("friendly".to_string()),
    }
}

#[tokio::test]
async fn teacher_creates_a_scheduled_matchup() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = MatchupService::default();

            let created = service
                .create_matchup(
                    txn,
                    &c.teacher.actor(),
                    new_matchup(c.game.id, c.team2.id, c.team1.id),
                )
                .await?;

            assert_eq!(created.status, MatchupStatus::Scheduled);
            assert_eq!(created.school_id, c.school_id);
            assert_eq!(created.created_by, Some(c.teacher.id));
            assert_eq!(created.team1_id, c.team2.id);
            assert_eq!(created.notes.as_deref(), Some("friendly"));
            assert!(created.started_at.is_none());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_rejects_bad_pairings() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = MatchupService::default();
            let teacher = c.teacher.actor();

            let err = service
                .create_matchup(txn, &teacher, new_matchup(c.game.id, c.team1.id, c.team1.id))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::SameTeamMatchup);

            let other = schools::create_school(txn, &unique_str("school")).await?;
            let stranger = create_user(txn, "student", UserRole::Student, Some(other.id)).await?;
            let foreign = create_team_with_member(txn, other.id, &stranger).await?;
            let err = service
                .create_matchup(txn, &teacher, new_matchup(c.game.id, c.team1.id, foreign.id))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::CrossSchoolMatchup);

            let err = service
                .create_matchup(
                    txn,
                    &c.student1.actor(),
                    new_matchup(c.game.id, c.team1.id, c.team2.id),
                )
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InsufficientRole);

            let retired =
                catalog::create_game(txn, GameCreate::new(unique_str("game")).inactive()).await?;
            let err = service
                .create_matchup(txn, &teacher, new_matchup(retired.id, c.team1.id, c.team2.id))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::GameInactive);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn status_timestamps_are_set_once() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = MatchupService::default();

            let started = service
                .update_status(txn, &c.matchup, MatchupStatus::InProgress)
                .await?;
            let started_at = started.started_at.expect("started_at set");
            assert!(started.completed_at.is_none());

            let done = service
                .update_status(txn, &started, MatchupStatus::Completed)
                .await?;
            assert_eq!(done.started_at, Some(started_at));
            let completed_at = done.completed_at.expect("completed_at set");

            let reopened = service
                .update_status(txn, &done, MatchupStatus::InProgress)
                .await?;
            assert_eq!(reopened.status, MatchupStatus::InProgress);
            assert_eq!(reopened.started_at, Some(started_at));
            assert_eq!(reopened.completed_at, Some(completed_at));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn manager_overview_reconciles_validated_steps() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let progression = ProgressionService::default();
            let service = MatchupService::new(progression);

            progression.complete_step(txn, &c.matchup, 1, None).await?;
            for team_id in [c.team1.id, c.team2.id] {
                progression
                    .validate_team_step(txn, &c.matchup, team_id, 2, c.teacher.id)
                    .await?;
            }
            progression.reset_step_progress(txn, &c.matchup, 2).await?;

            let member_view = service.overview(txn, &c.matchup, false).await?;
            assert!(member_view.reconciled_steps.is_empty());
            assert_eq!(member_view.current_step, Some(2));
            assert!(member_view.steps.iter().all(|s| !s.can_complete));

            let manager_view = service.overview(txn, &c.matchup, true).await?;
            assert_eq!(manager_view.reconciled_steps, vec![2]);
            assert_eq!(manager_view.current_step, Some(3));
            assert_eq!(manager_view.completed_steps, 2);
            assert_eq!(manager_view.total_steps, 3);
            assert_eq!(manager_view.total_estimated_duration_minutes, 30);

            let step2 = &manager_view.steps[1];
            assert!(step2.is_completed);
            assert!(step2.team1_validated && step2.team2_validated);
            let step3 = &manager_view.steps[2];
            assert!(step3.is_current && step3.can_complete);
            assert!(manager_view.last_activity.is_some());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn students_list_only_their_matchups() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_classroom(txn, &[false, false]).await?;
            let other = seed_classroom(txn, &[false]).await?;
            let service = MatchupService::default();

            let listed = service.list_for_student(txn, c.student1.id).await?;
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].matchup.id, c.matchup.id);
            assert_eq!(
                listed[0].current_step.as_ref().map(|s| s.step_number),
                Some(1)
            );

            let school = service.list_for_school(txn, other.school_id).await?;
            assert_eq!(school.len(), 1);
            assert_eq!(school[0].matchup.id, other.matchup.id);

            let loner = create_user(txn, "student", UserRole::Student, Some(c.school_id)).await?;
            assert!(service.list_for_student(txn, loner.id).await?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn admins_only_manage_their_own_school() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = MatchupService::default();

            let home_admin = create_user(txn, "admin", UserRole::Admin, Some(c.school_id)).await?;
            access::require_manager(&home_admin.actor(), &c.matchup)?;

            let other = schools::create_school(txn, &unique_str("school")).await?;
            let away_admin = create_user(txn, "admin", UserRole::Admin, Some(other.id)).await?;
            let away = away_admin.actor();

            let err = access::require_manager(&away, &c.matchup).unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);
            let err = access::require_viewer(txn, &away, &c.matchup)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);
            assert!(service.list_for_manager(txn, &away).await?.is_empty());

            // Creating a matchup elsewhere makes the admin its manager.
            let created = service
                .create_matchup(txn, &away, new_matchup(c.game.id, c.team1.id, c.team2.id))
                .await?;
            access::require_manager(&away, &created)?;
            let listed: Vec<i64> = service
                .list_for_manager(txn, &away)
                .await?
                .into_iter()
                .map(|m| m.matchup.id)
                .collect();
            assert_eq!(listed, vec![created.id]);

            let home: Vec<i64> = service
                .list_for_manager(txn, &home_admin.actor())
                .await?
                .into_iter()
                .map(|m| m.matchup.id)
                .collect();
            assert_eq!(home.len(), 2);
            assert!(home.contains(&c.matchup.id));
            Ok(())
        })
    })
    .await
}
