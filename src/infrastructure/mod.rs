//! Infrastructure Layer
//!
//! Concrete implementations behind the relay:
//! - In-memory connection registry
//! - HTML renderer
//! - Prometheus metrics

pub mod metrics;
pub mod registry;
pub mod rendering;
