//! Request/response logging middleware
//!
//! Emits one structured LogEvent per completed request with method, path,
//! status, duration, client address and matched route. The health check
//! and static paths are skipped.

use super::helpers::{client_ip, should_skip_logging};
use super::request_id::RequestId;
use crate::core::events::{LogEvent, LogLevel};
use crate::server::state::AppState;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, HttpMessage};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// Request logging middleware for Actix-web
pub struct RequestLoggingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestLoggingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestLoggingMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingMiddlewareService { service }))
    }
}

/// Service implementation for request logging middleware
pub struct RequestLoggingMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let skip = should_skip_logging(req.path());
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let source = client_ip(req.headers(), req.peer_addr());
        let user_agent = req
            .headers()
            .get(actix_web::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            if let (Some(state), false) = (state, skip) {
                let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

                let mut event = LogEvent::new(LogLevel::Info, "request", "request");
                event.request_id = res
                    .request()
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.as_str().to_string());
                event.method = Some(method);
                event.path = Some(path);
                event.status = Some(res.status().as_u16());
                event.duration_ms = Some((duration_ms * 100.0).round() / 100.0);
                event.client_ip = Some(source);
                event.user_agent = user_agent;
                event.route = res.request().match_pattern();

                state.emitter.emit(&event);
            }

            Ok(res)
        })
    }
}
