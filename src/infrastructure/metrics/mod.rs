//! Prometheus Metrics Module
//!
//! Provides relay-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Live connection gauge
//! - Messages accepted onto the broadcast queue
//! - Inbound payloads discarded, by reason
//! - Per-recipient delivery outcomes

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Live connections currently in the connection registry
pub static CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("connections_active", "Number of live relay connections").namespace("room_relay"),
    )
    .expect("Failed to create CONNECTIONS_ACTIVE metric")
});

/// Messages enqueued for fan-out
pub static MESSAGES_ENQUEUED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "messages_enqueued_total",
            "Total number of normalized messages enqueued for broadcast",
        )
        .namespace("room_relay"),
    )
    .expect("Failed to create MESSAGES_ENQUEUED_TOTAL metric")
});

/// Inbound payloads that never became a message
pub static PAYLOADS_DISCARDED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "payloads_discarded_total",
            "Total number of inbound payloads discarded",
        )
        .namespace("room_relay"),
        &["reason"], // "empty", "malformed"
    )
    .expect("Failed to create PAYLOADS_DISCARDED_TOTAL metric")
});

/// Per-recipient delivery outcomes
pub static DELIVERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("deliveries_total", "Total number of per-recipient deliveries")
            .namespace("room_relay"),
        &["outcome"], // "delivered", "write_failed", "render_failed"
    )
    .expect("Failed to create DELIVERIES_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(CONNECTIONS_ACTIVE.clone()))
        .expect("Failed to register CONNECTIONS_ACTIVE");
    registry
        .register(Box::new(MESSAGES_ENQUEUED_TOTAL.clone()))
        .expect("Failed to register MESSAGES_ENQUEUED_TOTAL");
    registry
        .register(Box::new(PAYLOADS_DISCARDED_TOTAL.clone()))
        .expect("Failed to register PAYLOADS_DISCARDED_TOTAL");
    registry
        .register(Box::new(DELIVERIES_TOTAL.clone()))
        .expect("Failed to register DELIVERIES_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to update the live connection count
pub fn set_connections_active(count: usize) {
    CONNECTIONS_ACTIVE.set(count as i64);
}

/// Helper to record a message accepted onto the queue
pub fn record_enqueued() {
    MESSAGES_ENQUEUED_TOTAL.inc();
}

/// Helper to record a discarded payload
pub fn record_discarded(reason: &str) {
    PAYLOADS_DISCARDED_TOTAL.with_label_values(&[reason]).inc();
}

/// Helper to record one recipient's delivery outcome
pub fn record_delivery(outcome: &str) {
    DELIVERIES_TOTAL.with_label_values(&[outcome]).inc();
}
