use actix_web::http::StatusCode;
use actix_web::test;
use backend::db::require_db;
use backend::db::txn::SharedTxn;
use backend::entities::users::UserRole;
use backend::AppError;
use serde_json::json;

use crate::support::factory::{create_user, seed_classroom, seed_three_step_classroom};
use crate::support::http::{as_user, send_json};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn teacher_creates_and_lists_matchups() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let c = seed_three_step_classroom(shared.transaction()).await?;
    let app = create_test_app(state).await;

    let req = as_user(
        test::TestRequest::post().uri("/api/matchups").set_json(json!({
            "game_id": c.game.id,
            "team1_id": c.team2.id,
            "team2_id": c.team1.id,
            "scheduled_date": "2026-03-02T09:00:00Z",
            "notes": "rematch",
        })),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, created) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "SCHEDULED");
    assert_eq!(created["created_by"], c.teacher.id);
    assert_eq!(created["notes"], "rematch");
    assert_eq!(created["scheduled_date"], "2026-03-02T09:00:00Z");

    let req = as_user(test::TestRequest::get().uri("/api/matchups"), &c.teacher, &sec, &shared);
    let (status, listed) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["current_step"]["step_number"], 1);

    let req = as_user(test::TestRequest::get().uri("/api/matchups"), &c.student1, &sec, &shared);
    let (status, listed) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(2));

    shared.rollback().await?;
    Ok(())
}

#[actix_web::test]
async fn create_rejects_students_and_bad_bodies() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let c = seed_three_step_classroom(shared.transaction()).await?;
    let app = create_test_app(state).await;

    let body = json!({ "game_id": c.game.id, "team1_id": c.team1.id, "team2_id": c.team2.id });

    let req = as_user(
        test::TestRequest::post().uri("/api/matchups").set_json(&body),
        &c.student1,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["code"], "INSUFFICIENT_ROLE");

    let req = as_user(
        test::TestRequest::post().uri("/api/matchups").set_json(json!({
            "game_id": c.game.id,
            "team1_id": c.team1.id,
            "team2_id": c.team1.id,
        })),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "SAME_TEAM_MATCHUP");

    let req = as_user(
        test::TestRequest::post()
            .uri("/api/matchups")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"game_id\": "),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "BAD_REQUEST");

    shared.rollback().await?;
    Ok(())
}

#[actix_web::test]
async fn overview_and_status_respect_roles() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();
    let c = seed_three_step_classroom(txn).await?;
    let outsider = create_user(txn, "outsider", UserRole::Student, Some(c.school_id)).await?;
    let elsewhere = seed_classroom(txn, &[false]).await?;
    let away_admin =
        create_user(txn, "admin", UserRole::Admin, Some(elsewhere.school_id)).await?;
    let app = create_test_app(state).await;

    let uri = format!("/api/matchups/{}", c.matchup.id);

    let req = as_user(test::TestRequest::get().uri(&uri), &c.student2, &sec, &shared);
    let (status, overview) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["current_step"], 1);
    assert_eq!(overview["total_steps"], 3);
    assert_eq!(overview["steps"][0]["is_current"], true);
    assert_eq!(overview["steps"][0]["can_complete"], false);

    let req = as_user(test::TestRequest::get().uri(&uri), &c.teacher, &sec, &shared);
    let (status, overview) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["steps"][0]["can_complete"], true);

    let req = as_user(test::TestRequest::get().uri(&uri), &outsider, &sec, &shared);
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["code"], "NOT_A_MEMBER");

    // A teacher from another school cannot manage this matchup.
    let status_uri = format!("{uri}/status");
    let req = as_user(
        test::TestRequest::post()
            .uri(&status_uri)
            .set_json(json!({ "status": "IN_PROGRESS" })),
        &elsewhere.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["code"], "FORBIDDEN");

    // Neither can an admin of another school.
    let req = as_user(
        test::TestRequest::post().uri(&format!("{uri}/steps/1/complete")),
        &away_admin,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["code"], "FORBIDDEN");

    let req = as_user(
        test::TestRequest::post()
            .uri(&status_uri)
            .set_json(json!({ "status": "PAUSED" })),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_STATUS");

    let req = as_user(
        test::TestRequest::post()
            .uri(&status_uri)
            .set_json(json!({ "status": "IN_PROGRESS" })),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, updated) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "IN_PROGRESS");
    assert!(updated["started_at"].is_string());

    let req = as_user(
        test::TestRequest::get().uri("/api/matchups/0"),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_MATCHUP_ID");

    let missing = format!("/api/matchups/{}", c.matchup.id + elsewhere.matchup.id + 1000);
    let req = as_user(test::TestRequest::get().uri(&missing), &c.teacher, &sec, &shared);
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], "MATCHUP_NOT_FOUND");

    shared.rollback().await?;
    Ok(())
}
