//! Admin routes over the users of their school.

use actix_web::{web, HttpRequest};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::domain::roles::Role;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::users::User;
use crate::services::users::{RoleChange, UserService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SetRolesRequest {
    user_ids: Vec<i64>,
    role: Role,
}

/// GET /api/users
async fn list_users(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<User>>, AppError> {
    let actor = user.actor();
    let users = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { UserService::new().list_school_users(txn, &actor).await })
    })
    .await?;
    Ok(web::Json(users))
}

/// POST /api/users/roles
async fn set_roles(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<SetRolesRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RoleChange>, AppError> {
    let actor = user.actor();
    let body = body.into_inner();

    let change = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            UserService::new()
                .set_roles(txn, &actor, &body.user_ids, body.role)
                .await
        })
    })
    .await?;
    Ok(web::Json(change))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_users)))
        .service(web::resource("/roles").route(web::post().to(set_roles)));
}
