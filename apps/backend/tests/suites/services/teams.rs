use backend::db::txn::with_txn;
use backend::entities::team_memberships::MembershipRole;
use backend::entities::users::UserRole;
use backend::repos::{schools, teams};
use backend::services::teams::{NewTeam, TeamPatch, TeamRemoval, TeamService};
use backend::{AppError, ErrorCode};
use backend_test_support::unique_helpers::unique_str;

use crate::support::build_test_state;
use crate::support::factory::{create_user, seed_three_step_classroom};

#[tokio::test]
async fn teacher_creates_team_in_own_school() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = TeamService::new();
            let teacher = c.teacher.actor();

            let name = unique_str("Owls");
            let team = service
                .create_team(
                    txn,
                    &teacher,
                    NewTeam {
                        name: format!("  {name} "),
                        description: Some("   ".to_string()),
                    },
                )
                .await?;
            assert_eq!(team.school_id, c.school_id);
            assert_eq!(team.name, name);
            assert_eq!(team.description, None);
            assert_eq!(team.created_by, Some(c.teacher.id));

            let listed = service.list_teams(txn, &teacher).await?;
            assert!(listed.iter().any(|t| t.id == team.id));
            assert!(listed.iter().any(|t| t.id == c.team1.id));

            let dup = service
                .create_team(
                    txn,
                    &teacher,
                    NewTeam {
                        name: name.clone(),
                        description: None,
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(dup.code(), ErrorCode::UniqueViolation);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn students_and_schoolless_staff_cannot_create_teams() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = TeamService::new();
            let req = || NewTeam {
                name: unique_str("team"),
                description: None,
            };

            let err = service
                .create_team(txn, &c.student1.actor(), req())
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InsufficientRole);

            let drifter = create_user(txn, "teacher", UserRole::Teacher, None).await?;
            let err = service
                .create_team(txn, &drifter.actor(), req())
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationError);
            assert!(service.list_teams(txn, &drifter.actor()).await?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn roster_changes_stay_inside_the_school() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = TeamService::new();
            let teacher = c.teacher.actor();

            // student2 plays for team2; adding them to team1 as leader is fine.
            let detail = service
                .add_member(txn, &teacher, c.team1.id, c.student2.id, MembershipRole::Leader)
                .await?;
            assert_eq!(detail.members.len(), 2);
            let added = detail
                .members
                .iter()
                .find(|m| m.user_id == c.student2.id)
                .expect("added member listed");
            assert_eq!(added.role, MembershipRole::Leader);
            assert_eq!(added.username, c.student2.username);

            let again = service
                .add_member(txn, &teacher, c.team1.id, c.student2.id, MembershipRole::Member)
                .await
                .unwrap_err();
            assert_eq!(again.code(), ErrorCode::UniqueViolation);

            let other = schools::create_school(txn, &unique_str("school")).await?;
            let outsider = create_user(txn, "student", UserRole::Student, Some(other.id)).await?;
            let err = service
                .add_member(txn, &teacher, c.team1.id, outsider.id, MembershipRole::Member)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::CrossSchoolMember);

            let err = service
                .add_member(txn, &teacher, c.team1.id, i64::MAX, MembershipRole::Member)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::UserNotFound);

            let detail = service
                .remove_member(txn, &teacher, c.team1.id, c.student2.id)
                .await?;
            assert_eq!(detail.members.len(), 1);
            let err = service
                .remove_member(txn, &teacher, c.team1.id, c.student2.id)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::MembershipNotFound);

            // Staff of another school do not see the team at all.
            let away = create_user(txn, "admin", UserRole::Admin, Some(other.id)).await?;
            let err = service
                .team_detail(txn, &away.actor(), c.team1.id)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::TeamNotFound);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn rename_and_clear_description() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = TeamService::new();
            let teacher = c.teacher.actor();

            let renamed = unique_str("Falcons");
            let team = service
                .update_team(
                    txn,
                    &teacher,
                    c.team1.id,
                    TeamPatch {
                        name: Some(renamed.clone()),
                        description: Some(Some("Morning group".to_string())),
                    },
                )
                .await?;
            assert_eq!(team.name, renamed);
            assert_eq!(team.description.as_deref(), Some("Morning group"));

            let team = service
                .update_team(
                    txn,
                    &teacher,
                    c.team1.id,
                    TeamPatch {
                        name: None,
                        description: Some(None),
                    },
                )
                .await?;
            assert_eq!(team.name, renamed);
            assert_eq!(team.description, None);

            let err = service
                .update_team(
                    txn,
                    &teacher,
                    c.team1.id,
                    TeamPatch {
                        name: Some("  ".to_string()),
                        description: None,
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationError);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn teachers_deactivate_and_admins_delete() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let service = TeamService::new();
            let admin = create_user(txn, "admin", UserRole::Admin, Some(c.school_id)).await?;

            let removal = service
                .remove_team(txn, &c.teacher.actor(), c.team1.id)
                .await?;
            assert_eq!(removal, TeamRemoval::Deactivated);
            let kept = teams::require_team(txn, c.team1.id).await?;
            assert!(!kept.is_active);

            // A deactivated team is gone from listings and lookups.
            let listed = service.list_teams(txn, &c.teacher.actor()).await?;
            assert!(listed.iter().all(|t| t.id != c.team1.id));
            let err = service
                .team_detail(txn, &c.teacher.actor(), c.team1.id)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::TeamNotFound);

            let removal = service.remove_team(txn, &admin.actor(), c.team2.id).await?;
            assert_eq!(removal, TeamRemoval::Deleted);
            assert!(teams::find_team(txn, c.team2.id).await?.is_none());
            Ok(())
        })
    })
    .await
}
