use actix_web::http::StatusCode;
use actix_web::test;
use backend::db::require_db;
use backend::db::txn::SharedTxn;
use backend::entities::users::UserRole;
use backend::AppError;
use serde_json::json;

use crate::support::factory::{create_user, seed_three_step_classroom};
use crate::support::http::{as_user, send_json};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn admin_authors_and_students_vote() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let c = seed_three_step_classroom(shared.transaction()).await?;
    let admin =
        create_user(shared.transaction(), "admin", UserRole::Admin, Some(c.school_id)).await?;
    let app = create_test_app(state).await;
    let chain_uri = format!("/api/games/{}/steps/1/instructions", c.game.id);

    let req = as_user(
        test::TestRequest::post().uri(&chain_uri).set_json(json!({
            "audience": "STUDENT",
            "title": "Open the notebook",
            "content": "Start from the template",
        })),
        &admin,
        &sec,
        &shared,
    );
    let (status, created) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["audience"], "STUDENT");
    let instruction_id = created["id"].as_i64().expect("id");

    let req = as_user(
        test::TestRequest::post().uri(&chain_uri).set_json(json!({
            "audience": "STUDENT",
            "title": "Sneaky",
            "content": "x",
        })),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["code"], "INSUFFICIENT_ROLE");

    let req = as_user(test::TestRequest::get().uri(&chain_uri), &c.student1, &sec, &shared);
    let (status, chain) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chain[0]["id"], instruction_id);

    let feedback_uri = format!("/api/instructions/{instruction_id}/feedback");
    let req = as_user(
        test::TestRequest::post()
            .uri(&feedback_uri)
            .set_json(json!({ "is_helpful": false, "comment": "Where is the template?" })),
        &c.student1,
        &sec,
        &shared,
    );
    let (status, receipt) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["created"], true);
    assert_eq!(receipt["summary"]["thumbs_down"], 1);

    let req = as_user(
        test::TestRequest::post()
            .uri(&feedback_uri)
            .set_json(json!({ "is_helpful": true })),
        &c.student1,
        &sec,
        &shared,
    );
    let (status, receipt) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["created"], false);
    assert_eq!(receipt["summary"]["percentage_positive"], 100.0);

    let req = as_user(
        test::TestRequest::get().uri("/api/instructions/feedback-report"),
        &admin,
        &sec,
        &shared,
    );
    let (status, report) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let good = report["good"].as_array().expect("good bucket");
    assert!(good.iter().any(|r| r["instruction_id"] == instruction_id));

    let req = as_user(
        test::TestRequest::delete().uri(&format!("{chain_uri}/{instruction_id}")),
        &admin,
        &sec,
        &shared,
    );
    let (status, _) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let req = as_user(
        test::TestRequest::post()
            .uri(&feedback_uri)
            .set_json(json!({ "is_helpful": true })),
        &c.student1,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], "INSTRUCTION_NOT_FOUND");

    shared.rollback().await?;
    Ok(())
}
