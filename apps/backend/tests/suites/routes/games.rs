use actix_web::http::StatusCode;
use actix_web::test;
use backend::adapters::instructions_sea::InstructionCreate;
use backend::db::require_db;
use backend::db::txn::SharedTxn;
use backend::entities::instruction_steps::InstructionRole;
use backend::repos::instructions;
use backend::AppError;
use serde_json::Value;

use crate::support::factory::seed_three_step_classroom;
use crate::support::http::{as_user, send_json};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn catalog_endpoints_list_games_and_steps() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let c = seed_three_step_classroom(shared.transaction()).await?;
    let app = create_test_app(state).await;

    let req = as_user(test::TestRequest::get().uri("/api/games"), &c.student1, &sec, &shared);
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .expect("array of games")
        .iter()
        .filter_map(|g| g["id"].as_i64())
        .collect();
    assert!(ids.contains(&c.game.id));

    let uri = format!("/api/games/{}/steps", c.game.id);
    let req = as_user(test::TestRequest::get().uri(&uri), &c.student1, &sec, &shared);
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_estimated_duration_minutes"], 30);
    assert_eq!(body["has_multiple_steps"], true);
    let numbers: Vec<i64> = body["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .filter_map(|s| s["step_number"].as_i64())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let req = as_user(
        test::TestRequest::get().uri("/api/games/not-a-number/steps"),
        &c.student1,
        &sec,
        &shared,
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_GAME_ID");

    let uri = format!("/api/games/{}/steps", c.game.id + 10_000);
    let req = as_user(test::TestRequest::get().uri(&uri), &c.student1, &sec, &shared);
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "GAME_NOT_FOUND");

    shared.rollback().await?;
    Ok(())
}

#[actix_web::test]
async fn instructions_follow_the_reader_role() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let txn = shared.transaction();
    let c = seed_three_step_classroom(txn).await?;
    let step_id = c.step(1).id;

    let second = instructions::create_instruction(
        txn,
        InstructionCreate::new(step_id, InstructionRole::Student, "Two", "Place your pieces"),
    )
    .await?;
    instructions::create_instruction(
        txn,
        InstructionCreate::new(step_id, InstructionRole::Student, "One", "Read the rules")
            .with_next(second.id),
    )
    .await?;
    instructions::create_instruction(
        txn,
        InstructionCreate::new(step_id, InstructionRole::Teacher, "Host", "Hand out boards"),
    )
    .await?;
    let app = create_test_app(state).await;

    let uri = format!("/api/games/{}/steps/1/instructions", c.game.id);

    let req = as_user(test::TestRequest::get().uri(&uri), &c.student1, &sec, &shared);
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .expect("instruction array")
        .iter()
        .filter_map(|i| i["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["One", "Two"]);

    let req = as_user(test::TestRequest::get().uri(&uri), &c.teacher, &sec, &shared);
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["audience"], Value::from("TEACHER"));

    let uri = format!("/api/games/{}/steps/9/instructions", c.game.id);
    let req = as_user(test::TestRequest::get().uri(&uri), &c.teacher, &sec, &shared);
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STEP_NOT_FOUND");

    shared.rollback().await?;
    Ok(())
}
