use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::CurrentStepPolicy;
use backend::infra::state::build_state;
use backend::AppError;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::test_state::test_state_builder;

#[actix_web::test]
async fn health_reports_database_and_policy() -> Result<(), AppError> {
    let state = test_state_builder()?
        .with_current_step_policy(CurrentStepPolicy::AfterHighestCompleted)
        .build()
        .await?;
    let app = create_test_app(state).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_ne!(body["migrations"], "unknown");
    assert_eq!(body["current_step_policy"], "after_highest_completed");
    assert!(body["time"].is_string());
    Ok(())
}

#[actix_web::test]
async fn health_without_database_is_degraded_not_down() -> Result<(), AppError> {
    let state = build_state().build().await?;
    let app = create_test_app(state).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
    assert_eq!(body["current_step_policy"], "first_incomplete");
    Ok(())
}
