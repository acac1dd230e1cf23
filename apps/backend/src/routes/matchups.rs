//! Matchup routes: lifecycle, the overview, and the step progression
//! endpoints used by students (submit, access) and teachers (complete,
//! validate).

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::matchup::MatchupStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, MatchupId, StepNumber, TeamId, ValidatedJson};
use crate::repos::catalog::GameStep;
use crate::repos::matchups::{self, Matchup};
use crate::repos::step_progress::StepProgress;
use crate::repos::team_validations::TeamValidation;
use crate::services::access;
use crate::services::matchups::{MatchupOverview, MatchupService, MatchupWithStep, NewMatchup};
use crate::services::progression::{ProgressionService, SubmitOutcome, ValidationOutcome};
use crate::state::app_state::AppState;

fn progression(app_state: &AppState) -> ProgressionService {
    ProgressionService::new(app_state.current_step_policy)
}

#[derive(Debug, Deserialize)]
struct CreateMatchupRequest {
    game_id: i64,
    team1_id: i64,
    team2_id: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    scheduled_date: Option<OffsetDateTime>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
}

#[derive(Debug, Serialize)]
struct CurrentStepResponse {
    matchup_id: i64,
    current_step: Option<GameStep>,
    is_finished: bool,
}

#[derive(Debug, Serialize)]
struct ProgressResponse {
    matchup_id: i64,
    step_number: i32,
    is_completed: bool,
    duration_minutes: Option<i64>,
    progress: Option<StepProgress>,
}

#[derive(Debug, Serialize)]
struct AccessResponse {
    matchup_id: i64,
    step_number: i32,
    accessible: bool,
}

#[derive(Debug, Serialize)]
struct TeamValidationResponse {
    matchup_id: i64,
    step_number: i32,
    team_id: i64,
    is_validated: bool,
    validation: Option<TeamValidation>,
}

/// GET /api/matchups
///
/// Teachers and admins see the matchups they manage; students see the
/// matchups of their own teams.
async fn list_matchups(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<MatchupWithStep>>, AppError> {
    let actor = user.actor();
    let service = MatchupService::new(progression(&app_state));

    let listed = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            if !actor.role.is_staff() {
                return service.list_for_student(txn, actor.user_id).await;
            }
            service.list_for_manager(txn, &actor).await
        })
    })
    .await?;
    Ok(web::Json(listed))
}

/// POST /api/matchups
async fn create_matchup(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<CreateMatchupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let actor = user.actor();
    let body = body.into_inner();
    let service = MatchupService::new(progression(&app_state));

    let created = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let req = NewMatchup {
                game_id: body.game_id,
                team1_id: body.team1_id,
                team2_id: body.team2_id,
                scheduled_date: body.scheduled_date,
                notes: body.notes,
            };
            service.create_matchup(txn, &actor, req).await
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/matchups/{matchup_id}
///
/// Managers get the reconcile sweep applied before the view is built.
async fn get_matchup(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<MatchupOverview>, AppError> {
    let actor = user.actor();
    let service = MatchupService::new(progression(&app_state));

    let overview = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            let viewer = access::require_viewer(txn, &actor, &matchup).await?;
            service.overview(txn, &matchup, viewer.is_manager()).await
        })
    })
    .await?;
    Ok(web::Json(overview))
}

/// POST /api/matchups/{matchup_id}/status
async fn update_status(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    body: ValidatedJson<UpdateStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Matchup>, AppError> {
    let actor = user.actor();
    let status: MatchupStatus = body
        .status
        .parse()
        .map_err(|e: String| AppError::bad_request(ErrorCode::InvalidStatus, e))?;
    let service = MatchupService::new(progression(&app_state));

    let updated = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_manager(&actor, &matchup)?;
            service.update_status(txn, &matchup, status).await
        })
    })
    .await?;
    Ok(web::Json(updated))
}

/// GET /api/matchups/{matchup_id}/current-step
async fn get_current_step(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CurrentStepResponse>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    let current_step = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_viewer(txn, &actor, &matchup).await?;
            service.current_step(txn, &matchup).await
        })
    })
    .await?;

    Ok(web::Json(CurrentStepResponse {
        matchup_id: matchup_id.0,
        is_finished: current_step.is_none(),
        current_step,
    }))
}

/// GET /api/matchups/{matchup_id}/steps/{step_number}/progress
async fn get_step_progress(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    step_number: StepNumber,
    app_state: web::Data<AppState>,
) -> Result<web::Json<ProgressResponse>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    let progress = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_viewer(txn, &actor, &matchup).await?;
            service
                .get_progress_for_step(txn, &matchup, step_number.0)
                .await
        })
    })
    .await?;

    Ok(web::Json(ProgressResponse {
        matchup_id: matchup_id.0,
        step_number: step_number.0,
        is_completed: progress.as_ref().is_some_and(|p| p.is_completed),
        duration_minutes: progress.as_ref().and_then(StepProgress::duration_minutes),
        progress,
    }))
}

/// GET /api/matchups/{matchup_id}/steps/{step_number}/access
///
/// 200 when the step may be opened, `STEP_LOCKED` otherwise.
async fn check_step_access(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    step_number: StepNumber,
    app_state: web::Data<AppState>,
) -> Result<web::Json<AccessResponse>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_viewer(txn, &actor, &matchup).await?;
            service
                .ensure_step_accessible(txn, &matchup, step_number.0, &actor)
                .await
        })
    })
    .await?;

    Ok(web::Json(AccessResponse {
        matchup_id: matchup_id.0,
        step_number: step_number.0,
        accessible: true,
    }))
}

/// POST /api/matchups/{matchup_id}/steps/{step_number}/submit
async fn submit_step(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    step_number: StepNumber,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SubmitOutcome>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    let outcome = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            service
                .submit_step(txn, &matchup, step_number.0, &actor)
                .await
        })
    })
    .await?;
    Ok(web::Json(outcome))
}

/// POST /api/matchups/{matchup_id}/steps/{step_number}/complete
async fn complete_step(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    step_number: StepNumber,
    app_state: web::Data<AppState>,
) -> Result<web::Json<StepProgress>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    let progress = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_manager(&actor, &matchup)?;
            service
                .complete_step(txn, &matchup, step_number.0, Some(actor.user_id))
                .await
        })
    })
    .await?;
    Ok(web::Json(progress))
}

/// POST /api/matchups/{matchup_id}/steps/{step_number}/teams/{team_id}/validate
async fn validate_team_step(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    step_number: StepNumber,
    team_id: TeamId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<ValidationOutcome>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    let outcome = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_manager(&actor, &matchup)?;
            service
                .validate_team_step(txn, &matchup, team_id.0, step_number.0, actor.user_id)
                .await
        })
    })
    .await?;
    Ok(web::Json(outcome))
}

/// GET /api/matchups/{matchup_id}/steps/{step_number}/teams/{team_id}/validation
async fn get_team_validation(
    http_req: HttpRequest,
    user: CurrentUser,
    matchup_id: MatchupId,
    step_number: StepNumber,
    team_id: TeamId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamValidationResponse>, AppError> {
    let actor = user.actor();
    let service = progression(&app_state);

    let validation = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let matchup = matchups::require_matchup(txn, matchup_id.0).await?;
            access::require_viewer(txn, &actor, &matchup).await?;
            service
                .team_validation(txn, &matchup, team_id.0, step_number.0)
                .await
        })
    })
    .await?;

    Ok(web::Json(TeamValidationResponse {
        matchup_id: matchup_id.0,
        step_number: step_number.0,
        team_id: team_id.0,
        is_validated: validation.as_ref().is_some_and(|v| v.is_validated),
        validation,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_matchups))
            .route(web::post().to(create_matchup)),
    )
    .service(web::resource("/{matchup_id}").route(web::get().to(get_matchup)))
    .service(web::resource("/{matchup_id}/status").route(web::post().to(update_status)))
    .service(web::resource("/{matchup_id}/current-step").route(web::get().to(get_current_step)))
    .service(
        web::resource("/{matchup_id}/steps/{step_number}/progress")
            .route(web::get().to(get_step_progress)),
    )
    .service(
        web::resource("/{matchup_id}/steps/{step_number}/access")
            .route(web::get().to(check_step_access)),
    )
    .service(
        web::resource("/{matchup_id}/steps/{step_number}/submit")
            .route(web::post().to(submit_step)),
    )
    .service(
        web::resource("/{matchup_id}/steps/{step_number}/complete")
            .route(web::post().to(complete_step)),
    )
    .service(
        web::resource("/{matchup_id}/steps/{step_number}/teams/{team_id}/validate")
            .route(web::post().to(validate_team_step)),
    )
    .service(
        web::resource("/{matchup_id}/steps/{step_number}/teams/{team_id}/validation")
            .route(web::get().to(get_team_validation)),
    );
}
