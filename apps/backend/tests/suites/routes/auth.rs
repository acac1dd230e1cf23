use actix_web::http::StatusCode;
use actix_web::{test, HttpMessage};
use backend::db::require_db;
use backend::db::txn::SharedTxn;
use backend::AppError;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::{unique_email, unique_str};

use crate::support::auth::{bearer_header, expired_bearer_header};
use crate::support::factory::seed_three_step_classroom;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn missing_bearer_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/api/matchups").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn malformed_and_expired_tokens_are_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header(("Authorization", "Basic abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let header = expired_bearer_header("someone", "someone@example.test", &sec);
    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header(("Authorization", header))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_EXPIRED_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn valid_token_for_unknown_user_is_forbidden() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let sec = state.security.clone();
    let shared = SharedTxn::open(require_db(&state)?).await?;
    // Seed something so the lookup runs against a non-empty table.
    seed_three_step_classroom(shared.transaction()).await?;
    let app = create_test_app(state).await;

    let header = bearer_header(&unique_str("ghost"), &unique_email("ghost"), &sec);
    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header(("Authorization", header))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "FORBIDDEN_USER_NOT_FOUND",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;

    shared.rollback().await?;
    Ok(())
}
