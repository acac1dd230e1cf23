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
async fn admin_lists_and_promotes_school_users() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let c = seed_three_step_classroom(shared.transaction()).await?;
    let admin =
        create_user(shared.transaction(), "admin", UserRole::Admin, Some(c.school_id)).await?;
    let app = create_test_app(state).await;

    let req = as_user(test::TestRequest::get().uri("/api/users"), &admin, &sec, &shared);
    let (status, listed) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(4));

    let req = as_user(
        test::TestRequest::post()
            .uri("/api/users/roles")
            .set_json(json!({ "user_ids": [c.student2.id], "role": "TEACHER" })),
        &admin,
        &sec,
        &shared,
    );
    let (status, change) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(change["updated_count"], 1);
    assert_eq!(change["role"], "TEACHER");

    // Roles are read from the database on every request, so the old token works.
    let req = as_user(test::TestRequest::get().uri("/api/teams"), &c.student2, &sec, &shared);
    let (status, _) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = as_user(
        test::TestRequest::post()
            .uri("/api/users/roles")
            .set_json(json!({ "user_ids": [c.student1.id], "role": "ADMIN" })),
        &c.teacher,
        &sec,
        &shared,
    );
    let (status, err) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["code"], "INSUFFICIENT_ROLE");

    shared.rollback().await?;
    Ok(())
}
