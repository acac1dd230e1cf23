//! Access log: one `request_completed` event per request.
//!
//! Level follows the status class (5xx error, 4xx warn, else info). The
//! acting user is the JWT `sub` when `JwtExtract` ran, `-` otherwise.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::claims::Claims;
use crate::middleware::trace_span::matchup_id_from_path;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct RequestLine {
    method: String,
    path: String,
    trace_id: String,
    matchup_id: Option<i64>,
}

impl RequestLine {
    fn emit(&self, status: StatusCode, user: &str, duration_ms: f64) {
        let status_code = status.as_u16();
        let matchup_id = self.matchup_id.unwrap_or_default();
        let (method, path, trace_id) = (&self.method, &self.path, &self.trace_id);
        macro_rules! line {
            ($level:ident) => {
                $level!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    duration_ms,
                    trace_id = %trace_id,
                    user = %user,
                    matchup_id,
                    "request_completed"
                )
            };
        }

        if status.is_server_error() {
            line!(error);
        } else if status.is_client_error() {
            line!(warn);
        } else {
            line!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let line = RequestLine {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<String>()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string()),
            matchup_id: matchup_id_from_path(req.path()),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, user) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<Claims>()
                        .map(|c| c.sub.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
            line.emit(status, user.as_deref().unwrap_or("-"), duration_ms);

            result
        })
    }
}
