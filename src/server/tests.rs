//! Tests for the server module
//!
//! End-to-end coverage of the ingestion pipeline: admission, lenient
//! parsing, truncation, redaction, log emission and alert dispatch.

use crate::config::{Config, LogSinkTarget};
use crate::core::events::TRUNCATION_MARKER;
use crate::server::handlers::{health_check, report_client_error};
use crate::server::middleware::{RequestIdMiddleware, RequestLoggingMiddleware};
use crate::server::state::AppState;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

struct TestHarness {
    state: AppState,
    log_path: PathBuf,
    _dir: tempfile::TempDir,
}

fn harness(limit: u32, webhook_url: Option<String>) -> TestHarness {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("events.log");

    let mut config = Config::default();
    config.gateway.rate_limit.limit = limit;
    config.gateway.rate_limit.window_seconds = 60;
    config.gateway.log.sink = LogSinkTarget::File {
        path: log_path.to_string_lossy().into_owned(),
    };
    config.gateway.alerts.webhook_url = webhook_url;

    TestHarness {
        state: AppState::new(&config).unwrap(),
        log_path,
        _dir: dir,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .wrap(RequestLoggingMiddleware)
                .wrap(RequestIdMiddleware)
                .route("/health", web::get().to(health_check))
                .route("/client-logs", web::post().to(report_client_error)),
        )
        .await
    };
}

fn read_events(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn client_events(path: &Path) -> Vec<Value> {
    read_events(path)
        .into_iter()
        .filter(|e| e["logger_name"] == "client")
        .collect()
}

fn post_report(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/client-logs")
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn test_health_check_ok() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), 200);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_request_id_echoed() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "test-id-123"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(
        res.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "test-id-123"
    );
}

#[actix_web::test]
async fn test_request_id_generated_when_absent() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(!id.is_empty());
    assert_ne!(id, "invalid");
}

#[actix_web::test]
async fn test_ingestion_and_rate_limit() {
    let harness = harness(2, None);
    let app = init_app!(harness.state);

    let payload = json!({"level": "error", "message": "client failure"});

    let first = test::call_service(&app, post_report(payload.clone()).to_request()).await;
    assert_eq!(first.status(), 202);
    let second = test::call_service(&app, post_report(payload.clone()).to_request()).await;
    assert_eq!(second.status(), 202);
    let third = test::call_service(&app, post_report(payload).to_request()).await;
    assert_eq!(third.status(), 429);

    let body: Value = test::read_body_json(third).await;
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
    assert!(body["retry_after_secs"].as_u64().is_some());
}

#[actix_web::test]
async fn test_twelve_reports_first_ten_logged() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);
    assert!(!harness.state.alerts.is_enabled());

    let mut statuses = Vec::new();
    for i in 0..12 {
        let res = test::call_service(
            &app,
            post_report(json!({"level": "error", "message": format!("failure {}", i)}))
                .to_request(),
        )
        .await;
        statuses.push(res.status().as_u16());
    }

    assert_eq!(statuses.iter().filter(|&&s| s == 202).count(), 10);
    assert_eq!(statuses.iter().filter(|&&s| s == 429).count(), 2);

    let events = client_events(&harness.log_path);
    assert_eq!(events.len(), 10);
    for event in &events {
        assert_eq!(event["level"], "ERROR");
    }
}

#[actix_web::test]
async fn test_rejected_report_not_logged() {
    let harness = harness(1, None);
    let app = init_app!(harness.state);

    let payload = json!({"message": "boom"});
    test::call_service(&app, post_report(payload.clone()).to_request()).await;
    let rejected = test::call_service(&app, post_report(payload).to_request()).await;
    assert_eq!(rejected.status(), 429);

    assert_eq!(client_events(&harness.log_path).len(), 1);
}

#[actix_web::test]
async fn test_distinct_sources_rate_limited_independently() {
    let harness = harness(1, None);
    let app = init_app!(harness.state);

    let payload = json!({"message": "boom"});
    let from = |ip: &str| {
        post_report(payload.clone())
            .insert_header(("X-Forwarded-For", ip.to_string()))
            .to_request()
    };

    assert_eq!(test::call_service(&app, from("10.0.0.1")).await.status(), 202);
    assert_eq!(test::call_service(&app, from("10.0.0.1")).await.status(), 429);
    assert_eq!(test::call_service(&app, from("10.0.0.2")).await.status(), 202);

    let events = client_events(&harness.log_path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["client_ip"], "10.0.0.1");
    assert_eq!(events[1]["client_ip"], "10.0.0.2");
}

#[actix_web::test]
async fn test_message_truncated_once() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let long = "x".repeat(600);
    let res = test::call_service(
        &app,
        post_report(json!({"message": long, "stack": "y".repeat(700)})).to_request(),
    )
    .await;
    assert_eq!(res.status(), 202);

    let events = client_events(&harness.log_path);
    let message = events[0]["message"].as_str().unwrap();
    assert_eq!(message.len(), 500 + TRUNCATION_MARKER.len());
    assert_eq!(message.matches(TRUNCATION_MARKER).count(), 1);
    assert!(message.ends_with(TRUNCATION_MARKER));

    let stack = events[0]["stack"].as_str().unwrap();
    assert_eq!(stack.len(), 500 + TRUNCATION_MARKER.len());
}

#[actix_web::test]
async fn test_sensitive_extra_fields_redacted() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let res = test::call_service(
        &app,
        post_report(json!({
            "message": "boom",
            "extra": {"password": "abc", "nested": {"token": "xyz"}},
        }))
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), 202);

    let raw = std::fs::read_to_string(&harness.log_path).unwrap();
    assert!(!raw.contains("abc"));
    assert!(!raw.contains("xyz"));
    assert_eq!(raw.matches("[REDACTED]").count(), 2);
}

#[actix_web::test]
async fn test_partial_payload_gets_placeholders() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let res = test::call_service(&app, post_report(json!({})).to_request()).await;
    assert_eq!(res.status(), 202);

    let events = client_events(&harness.log_path);
    assert_eq!(events[0]["message"], "Script error");
    assert_eq!(events[0]["level"], "ERROR");
}

#[actix_web::test]
async fn test_unparseable_payload_dropped() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let req = test::TestRequest::post()
        .uri("/client-logs")
        .set_payload("this is not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);

    assert!(client_events(&harness.log_path).is_empty());
}

#[actix_web::test]
async fn test_unknown_payload_fields_ignored() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let res = test::call_service(
        &app,
        post_report(json!({"message": "boom", "surprise": {"deep": true}})).to_request(),
    )
    .await;
    assert_eq!(res.status(), 202);

    let events = client_events(&harness.log_path);
    assert!(events[0].get("surprise").is_none());
}

#[actix_web::test]
async fn test_request_id_propagated_into_client_event() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    let req = post_report(json!({"message": "boom"}))
        .insert_header(("X-Request-ID", "corr-42"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 202);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["request_id"], "corr-42");

    let events = client_events(&harness.log_path);
    assert_eq!(events[0]["request_id"], "corr-42");
}

#[actix_web::test]
async fn test_rejection_responses_carry_request_id() {
    let harness = harness(1, None);
    let app = init_app!(harness.state);

    // Unparseable body is admitted first, then dropped with a 400
    let bad = test::TestRequest::post()
        .uri("/client-logs")
        .insert_header(("X-Request-ID", "corr-bad"))
        .set_payload("this is not json")
        .to_request();
    let res = test::call_service(&app, bad).await;
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["request_id"], "corr-bad");

    // Window capacity is spent, so the next report is rate-limited
    let limited = test::call_service(
        &app,
        post_report(json!({"message": "boom"}))
            .insert_header(("X-Request-ID", "corr-limited"))
            .to_request(),
    )
    .await;
    assert_eq!(limited.status(), 429);
    let body: Value = test::read_body_json(limited).await;
    assert_eq!(body["request_id"], "corr-limited");
}

#[actix_web::test]
async fn test_request_logging_covers_ingestion_but_not_health() {
    let harness = harness(10, None);
    let app = init_app!(harness.state);

    test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    test::call_service(&app, post_report(json!({"message": "boom"})).to_request()).await;

    let request_events: Vec<Value> = read_events(&harness.log_path)
        .into_iter()
        .filter(|e| e["logger_name"] == "request")
        .collect();

    assert_eq!(request_events.len(), 1);
    let event = &request_events[0];
    assert_eq!(event["method"], "POST");
    assert_eq!(event["path"], "/client-logs");
    assert_eq!(event["status"], 202);
    assert!(event["duration_ms"].as_f64().is_some());
}

#[actix_web::test]
async fn test_error_report_dispatches_alert() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let harness = harness(10, Some(server.uri()));
    let app = init_app!(harness.state);

    let res = test::call_service(&app, post_report(json!({"message": "boom"})).to_request()).await;
    assert_eq!(res.status(), 202);

    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    server.verify().await;
}
