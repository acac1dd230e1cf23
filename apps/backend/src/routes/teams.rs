//! Team roster routes for teachers and admins of the team's school.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::entities::team_memberships::MembershipRole;
use crate::error::AppError;
use crate::extractors::{CurrentUser, TeamId, UserId, ValidatedJson};
use crate::repos::teams::Team;
use crate::routes::present;
use crate::services::teams::{NewTeam, TeamDetail, TeamPatch, TeamRemoval, TeamService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateTeamRequest {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateTeamRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct AddMemberRequest {
    user_id: i64,
    #[serde(default = "default_member_role")]
    role: MembershipRole,
}

fn default_member_role() -> MembershipRole {
    MembershipRole::Member
}

#[derive(Debug, Serialize)]
struct TeamRemovalResponse {
    team_id: i64,
    removal: TeamRemoval,
}

/// GET /api/teams
async fn list_teams(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<Team>>, AppError> {
    let actor = user.actor();
    let teams = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { TeamService::new().list_teams(txn, &actor).await })
    })
    .await?;
    Ok(web::Json(teams))
}

/// POST /api/teams
async fn create_team(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<CreateTeamRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let team = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let req = NewTeam {
                name: body.name,
                description: body.description,
            };
            TeamService::new().create_team(txn, &actor, req).await
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(team))
}

/// GET /api/teams/{team_id}
async fn get_team(
    http_req: HttpRequest,
    user: CurrentUser,
    team_id: TeamId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamDetail>, AppError> {
    let actor = user.actor();
    let detail = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { TeamService::new().team_detail(txn, &actor, team_id.0).await })
    })
    .await?;
    Ok(web::Json(detail))
}

/// PATCH /api/teams/{team_id}
async fn update_team(
    http_req: HttpRequest,
    user: CurrentUser,
    team_id: TeamId,
    body: ValidatedJson<UpdateTeamRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Team>, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let team = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let patch = TeamPatch {
                name: body.name,
                description: body.description,
            };
            TeamService::new()
                .update_team(txn, &actor, team_id.0, patch)
                .await
        })
    })
    .await?;
    Ok(web::Json(team))
}

/// DELETE /api/teams/{team_id}
///
/// Admins delete the team outright; teachers only deactivate it.
async fn remove_team(
    http_req: HttpRequest,
    user: CurrentUser,
    team_id: TeamId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamRemovalResponse>, AppError> {
    let actor = user.actor();
    let removal = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { TeamService::new().remove_team(txn, &actor, team_id.0).await })
    })
    .await?;
    Ok(web::Json(TeamRemovalResponse {
        team_id: team_id.0,
        removal,
    }))
}

/// POST /api/teams/{team_id}/members
async fn add_member(
    http_req: HttpRequest,
    user: CurrentUser,
    team_id: TeamId,
    body: ValidatedJson<AddMemberRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let detail = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            TeamService::new()
                .add_member(txn, &actor, team_id.0, body.user_id, body.role)
                .await
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(detail))
}

/// DELETE /api/teams/{team_id}/members/{user_id}
async fn remove_member(
    http_req: HttpRequest,
    user: CurrentUser,
    team_id: TeamId,
    user_id: UserId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TeamDetail>, AppError> {
    let actor = user.actor();
    let detail = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            TeamService::new()
                .remove_member(txn, &actor, team_id.0, user_id.0)
                .await
        })
    })
    .await?;
    Ok(web::Json(detail))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_teams))
            .route(web::post().to(create_team)),
    )
    .service(
        web::resource("/{team_id}")
            .route(web::get().to(get_team))
            .route(web::patch().to(update_team))
            .route(web::delete().to(remove_team)),
    )
    .service(web::resource("/{team_id}/members").route(web::post().to(add_member)))
    .service(
        web::resource("/{team_id}/members/{user_id}").route(web::delete().to(remove_member)),
    );
}
