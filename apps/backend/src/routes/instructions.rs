//! Instruction feedback: any reader may vote, admins read the report.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, InstructionId, ValidatedJson};
use crate::services::feedback::{FeedbackReport, FeedbackService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct FeedbackRequest {
    is_helpful: bool,
    #[serde(default)]
    comment: Option<String>,
}

/// POST /api/instructions/{instruction_id}/feedback
///
/// 201 on a first vote, 200 when it replaces an earlier one.
async fn submit_feedback(
    http_req: HttpRequest,
    user: CurrentUser,
    instruction_id: InstructionId,
    body: ValidatedJson<FeedbackRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let receipt = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            FeedbackService::new()
                .submit(txn, &actor, instruction_id.0, body.is_helpful, body.comment)
                .await
        })
    })
    .await?;

    if receipt.created {
        Ok(HttpResponse::Created().json(receipt))
    } else {
        Ok(HttpResponse::Ok().json(receipt))
    }
}

/// GET /api/instructions/feedback-report
async fn feedback_report(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<FeedbackReport>, AppError> {
    let actor = user.actor();
    let report = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            FeedbackService::new()
                .report(txn, &actor, OffsetDateTime::now_utc())
                .await
        })
    })
    .await?;
    Ok(web::Json(report))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/feedback-report").route(web::get().to(feedback_report)))
        .service(
            web::resource("/{instruction_id}/feedback").route(web::post().to(submit_feedback)),
        );
}
