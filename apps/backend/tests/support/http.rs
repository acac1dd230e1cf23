//! Request helpers for route tests.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error, HttpMessage};
use backend::db::txn::SharedTxn;
use backend::repos::users::User;
use backend::state::security_config::SecurityConfig;
use serde_json::Value;

use super::auth::bearer_header;

/// Finish `req` with `user`'s bearer token and the test's shared transaction.
pub fn as_user(
    req: test::TestRequest,
    user: &User,
    sec: &SecurityConfig,
    shared: &SharedTxn,
) -> Request {
    let email = user.email.clone().unwrap_or_default();
    let req = req
        .insert_header(("Authorization", bearer_header(&user.sub, &email, sec)))
        .to_request();
    req.extensions_mut().insert(shared.clone());
    req
}

/// Send `req` and read back the status and JSON body (`Null` when empty).
pub async fn send_json<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
