//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::{body_json, body_text, TestApp};

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

/// Test liveness probe endpoint
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");
}

/// Test readiness probe reports connections and rooms
#[tokio::test]
async fn test_readiness_probe() {
    let app = TestApp::new();
    let _a = app.connect().await;
    let mut b = app.connect().await;
    b.join_room("lobby").await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["connections"]["active"], 2);
    assert_eq!(json["connections"]["rooms"], 2);
    assert_eq!(json["dispatcher"]["queue_capacity"], 32);
}

/// Readiness fails once the dispatcher is gone
#[tokio::test]
async fn test_readiness_without_dispatcher() {
    let mut app = TestApp::new();
    app.stop_dispatcher().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["dispatcher"]["status"], "unhealthy");
}

/// Metrics endpoint exposes relay metrics
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new();
    let mut client = app.connect().await;
    client.send(r#"{"text":"counted"}"#);
    client.next_frame().await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("room_relay_messages_enqueued_total"));
    assert!(body.contains("room_relay_connections_active"));
}
