use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::auth::claims::Claims;
use crate::db::require_db;
use crate::db::txn::SharedTxn;
use crate::domain::roles::{Actor, Role};
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The authenticated user, loaded from the database using the JWT `sub`
/// that `JwtExtract` left in request extensions.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub school_id: Option<i64>,
}

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
            school_id: self.school_id,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<Claims>()
                .cloned()
                .ok_or_else(AppError::unauthorized_missing_bearer)?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let user = if let Some(shared_txn) = SharedTxn::from_req(&req) {
                users::find_user_by_sub(shared_txn.transaction(), &claims.sub).await?
            } else {
                let db = require_db(app_state)?;
                users::find_user_by_sub(db, &claims.sub).await?
            };

            let user = user.ok_or_else(AppError::forbidden_user_not_found)?;

            // Email comes from the token; the row may not carry one.
            Ok(CurrentUser {
                id: user.id,
                sub: claims.sub,
                email: claims.email,
                role: user.role,
                school_id: user.school_id,
            })
        })
    }
}
