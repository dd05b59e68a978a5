//! HTTP route handlers

use crate::core::events::{
    truncate_field, ClientErrorPayload, LogEvent, LogLevel, PLACEHOLDER_SCRIPT_ERROR,
};
use crate::server::middleware::{client_ip, RequestId};
use crate::server::state::AppState;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::warn;

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Client error ingestion endpoint
///
/// Composes the server half of the pipeline: rate limiter (admit or
/// respond 429), lenient parse (placeholders for missing fields, 400 only
/// when the body is not JSON at all), truncation, log emission and alert
/// dispatch. Responds 202 on admission regardless of downstream logging
/// success.
pub async fn report_client_error(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string());
    let source = client_ip(req.headers(), req.peer_addr());

    let decision = state.rate_limiter.admit(&source);
    if !decision.allowed {
        return HttpResponse::TooManyRequests().json(json!({
            "error": {
                "code": "RATE_LIMITED",
                "message": "Client log rate limit exceeded",
            },
            "retry_after_secs": decision.retry_after_secs,
            "request_id": request_id,
        }));
    }

    let payload: ClientErrorPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            // Unparseable as structured data at all: drop the event
            warn!(source = %source, error = %e, "dropping unparseable client log payload");
            return HttpResponse::BadRequest().json(json!({
                "error": {
                    "code": "BAD_REQUEST",
                    "message": "Payload is not valid JSON",
                },
                "request_id": request_id,
            }));
        }
    };

    let event = build_client_event(&req, &state, payload, request_id.clone(), source);
    state.emitter.emit(&event);
    state.alerts.dispatch(&event);

    HttpResponse::Accepted().json(json!({
        "status": "accepted",
        "request_id": request_id,
    }))
}

fn build_client_event(
    req: &HttpRequest,
    state: &AppState,
    payload: ClientErrorPayload,
    request_id: Option<String>,
    source: String,
) -> LogEvent {
    let max_len = state.config.gateway.telemetry.max_field_len;

    let message = payload
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .map(|m| truncate_field(m, max_len))
        .unwrap_or_else(|| PLACEHOLDER_SCRIPT_ERROR.to_string());

    let mut event = LogEvent::new(
        LogLevel::from_client_str(&payload.level),
        "client",
        message,
    );
    event.request_id = request_id;
    event.client_ip = Some(source);
    event.error_type = Some("ClientError".to_string());
    event.stack = payload.stack.as_deref().map(|s| truncate_field(s, max_len));
    event.user_agent = payload.user_agent.clone().or_else(|| {
        req.headers()
            .get(actix_web::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    });

    let mut extra = serde_json::Map::new();
    if let Some(url) = payload.url {
        extra.insert("url".to_string(), json!(url));
    }
    if let Some(ts) = payload.timestamp {
        extra.insert("client_timestamp".to_string(), json!(ts));
    }
    if let Some(fields) = payload.extra {
        for (key, value) in fields {
            extra.insert(key, value);
        }
    }
    if !extra.is_empty() {
        event.extra_context = Some(serde_json::Value::Object(extra));
    }

    event
}
