//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (is the dispatcher draining the queue?)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;

use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub dispatcher: DispatcherHealth,
    pub connections: ConnectionStats,
}

/// Broadcast queue and dispatcher state
#[derive(Debug, Serialize)]
pub struct DispatcherHealth {
    pub status: HealthStatus,
    pub queue_capacity: usize,
    pub queue_available: usize,
}

/// Live connection statistics
#[derive(Debug, Serialize)]
pub struct ConnectionStats {
    pub active: usize,
    pub rooms: usize,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - 200 while the dispatcher is consuming, 503 once it is gone
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let queue_capacity = state.queue.max_capacity();
    let queue_available = state.queue.capacity();
    let status = dispatcher_status(state.queue.is_closed(), queue_available);

    let response = ReadinessResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        dispatcher: DispatcherHealth {
            status,
            queue_capacity,
            queue_available,
        },
        connections: ConnectionStats {
            active: state.registry.len(),
            rooms: state.registry.room_count(),
        },
    };

    let status_code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// A closed queue means the dispatcher has stopped; a full one means
/// producers are currently blocked.
fn dispatcher_status(queue_closed: bool, queue_available: usize) -> HealthStatus {
    if queue_closed {
        HealthStatus::Unhealthy
    } else if queue_available == 0 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}
