//! Game catalog routes. Any authenticated user may read them; only admins
//! author instructions.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::domain::roles::Audience;
use crate::error::AppError;
use crate::extractors::{CurrentUser, GameId, InstructionId, StepNumber, ValidatedJson};
use crate::repos::catalog::Game;
use crate::repos::instructions::Instruction;
use crate::routes::present;
use crate::services::authoring::{AuthoringService, InstructionPatch, NewInstruction};
use crate::services::catalog::{CatalogService, GameCatalog};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateInstructionRequest {
    audience: Audience,
    title: String,
    content: String,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    next_instruction_id: Option<i64>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct UpdateInstructionRequest {
    #[serde(default)]
    audience: Option<Audience>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    next_instruction_id: Option<Option<i64>>,
}

/// GET /api/games
async fn list_games(
    http_req: HttpRequest,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<Game>>, AppError> {
    let games = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { CatalogService::new().list_games(txn).await })
    })
    .await?;
    Ok(web::Json(games))
}

/// GET /api/games/{game_id}/steps
async fn get_steps(
    http_req: HttpRequest,
    _user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameCatalog>, AppError> {
    let catalog = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { CatalogService::new().game_catalog(txn, game_id.0).await })
    })
    .await?;
    Ok(web::Json(catalog))
}

/// GET /api/games/{game_id}/steps/{step_number}/instructions
///
/// Students get the student chain, teachers and admins the teacher chain.
async fn get_instructions(
    http_req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    step_number: StepNumber,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<Instruction>>, AppError> {
    let audience = user.role.instruction_audience();
    let chain = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            CatalogService::new()
                .instruction_chain(txn, game_id.0, step_number.0, audience)
                .await
        })
    })
    .await?;
    Ok(web::Json(chain))
}

/// POST /api/games/{game_id}/steps/{step_number}/instructions
async fn create_instruction(
    http_req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    step_number: StepNumber,
    body: ValidatedJson<CreateInstructionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let created = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let req = NewInstruction {
                audience: body.audience,
                title: body.title,
                content: body.content,
                is_active: body.is_active,
                next_instruction_id: body.next_instruction_id,
            };
            AuthoringService::new()
                .create_instruction(txn, &actor, game_id.0, step_number.0, req)
                .await
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(created))
}

/// PATCH /api/games/{game_id}/steps/{step_number}/instructions/{instruction_id}
async fn update_instruction(
    http_req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    step_number: StepNumber,
    instruction_id: InstructionId,
    body: ValidatedJson<UpdateInstructionRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Instruction>, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let updated = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let patch = InstructionPatch {
                audience: body.audience,
                title: body.title,
                content: body.content,
                is_active: body.is_active,
                next_instruction_id: body.next_instruction_id,
            };
            AuthoringService::new()
                .update_instruction(
                    txn,
                    &actor,
                    game_id.0,
                    step_number.0,
                    instruction_id.0,
                    patch,
                )
                .await
        })
    })
    .await?;
    Ok(web::Json(updated))
}

/// DELETE /api/games/{game_id}/steps/{step_number}/instructions/{instruction_id}
async fn delete_instruction(
    http_req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    step_number: StepNumber,
    instruction_id: InstructionId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let actor = user.actor();
    with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            AuthoringService::new()
                .delete_instruction(txn, &actor, game_id.0, step_number.0, instruction_id.0)
                .await
        })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_games)))
        .service(web::resource("/{game_id}/steps").route(web::get().to(get_steps)))
        .service(
            web::resource("/{game_id}/steps/{step_number}/instructions")
                .route(web::get().to(get_instructions))
                .route(web::post().to(create_instruction)),
        )
        .service(
            web::resource("/{game_id}/steps/{step_number}/instructions/{instruction_id}")
                .route(web::patch().to(update_instruction))
                .route(web::delete().to(delete_instruction)),
        );
}
