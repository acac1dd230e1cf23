use backend::adapters::instructions_sea::InstructionCreate;
use backend::db::txn::with_txn;
use backend::domain::feedback::FeedbackHealth;
use backend::entities::instruction_steps::InstructionRole;
use backend::entities::users::UserRole;
use backend::repos::instructions;
use backend::services::feedback::FeedbackService;
use backend::{AppError, ErrorCode};
use time::OffsetDateTime;

use crate::support::build_test_state;
use crate::support::factory::{create_user, seed_three_step_classroom};

#[tokio::test]
async fn vote_is_upserted_per_reader() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let note = instructions::create_instruction(
                txn,
                InstructionCreate::new(c.step(1).id, InstructionRole::Student, "Read", "Go"),
            )
            .await?;
            let service = FeedbackService::new();

            let first = service
                .submit(txn, &c.student1.actor(), note.id, false, Some("  unclear ".into()))
                .await?;
            assert!(first.created);
            assert_eq!(first.feedback.comment.as_deref(), Some("unclear"));
            assert_eq!(first.summary.total, 1);
            assert_eq!(first.summary.thumbs_down, 1);

            let second = service
                .submit(txn, &c.student1.actor(), note.id, true, Some("   ".into()))
                .await?;
            assert!(!second.created);
            assert_eq!(second.feedback.id, first.feedback.id);
            assert_eq!(second.feedback.comment, None);
            assert_eq!(second.summary.total, 1);
            assert_eq!(second.summary.percentage_positive, 100.0);

            let third = service
                .submit(txn, &c.student2.actor(), note.id, false, None)
                .await?;
            assert_eq!(third.summary.total, 2);
            assert_eq!(third.summary.percentage_positive, 50.0);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn hidden_instructions_read_as_missing() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let teacher_note = instructions::create_instruction(
                txn,
                InstructionCreate::new(c.step(1).id, InstructionRole::Teacher, "Guide", "Hint"),
            )
            .await?;
            let retired = instructions::create_instruction(
                txn,
                InstructionCreate::new(c.step(1).id, InstructionRole::Student, "Old", "Gone")
                    .inactive(),
            )
            .await?;
            let service = FeedbackService::new();

            for id in [teacher_note.id, retired.id] {
                let err = service
                    .submit(txn, &c.student1.actor(), id, true, None)
                    .await
                    .unwrap_err();
                assert_eq!(err.code(), ErrorCode::InstructionNotFound);
            }

            // Staff read the teacher chain.
            let receipt = service
                .submit(txn, &c.teacher.actor(), teacher_note.id, true, None)
                .await?;
            assert!(receipt.created);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn report_buckets_instructions_by_feedback() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let c = seed_three_step_classroom(txn).await?;
            let admin = create_user(txn, "admin", UserRole::Admin, Some(c.school_id)).await?;
            let step_id = c.step(2).id;
            let create = |title: &'static str| {
                InstructionCreate::new(step_id, InstructionRole::Student, title, "text")
            };
            let liked = instructions::create_instruction(txn, create("Liked")).await?;
            let disliked = instructions::create_instruction(txn, create("Disliked")).await?;
            let quiet = instructions::create_instruction(txn, create("Quiet")).await?;
            let service = FeedbackService::new();

            service
                .submit(txn, &c.student1.actor(), liked.id, true, None)
                .await?;
            service
                .submit(txn, &c.student1.actor(), disliked.id, false, None)
                .await?;

            let err = service
                .report(txn, &c.teacher.actor(), OffsetDateTime::now_utc())
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InsufficientRole);

            let report = service
                .report(txn, &admin.actor(), OffsetDateTime::now_utc())
                .await?;
            let bucket_of = |id: i64| {
                [
                    (FeedbackHealth::Problematic, &report.problematic),
                    (FeedbackHealth::RecentIssues, &report.recent_issues),
                    (FeedbackHealth::NoFeedback, &report.no_feedback),
                    (FeedbackHealth::Good, &report.good),
                ]
                .into_iter()
                .find(|(_, rows)| rows.iter().any(|r| r.instruction_id == id))
                .map(|(health, _)| health)
            };
            assert_eq!(bucket_of(liked.id), Some(FeedbackHealth::Good));
            assert_eq!(bucket_of(disliked.id), Some(FeedbackHealth::RecentIssues));
            assert_eq!(bucket_of(quiet.id), Some(FeedbackHealth::NoFeedback));

            let entry = report
                .recent_issues
                .iter()
                .find(|r| r.instruction_id == disliked.id)
                .expect("disliked listed");
            assert_eq!(entry.game_id, c.game.id);
            assert_eq!(entry.step_number, 2);
            assert_eq!(entry.reasons, vec!["Recent negative feedback (last 7 days)"]);

            assert!(report.stats.total_instructions >= 3);
            assert!(report.stats.total_feedback >= 2);
            assert!(report.stats.recent_feedback_count >= 2);
            Ok(())
        })
    })
    .await
}
