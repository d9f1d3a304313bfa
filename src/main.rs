//! # Room Relay
//!
//! A real-time multi-room chat relay.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Connection registry and broadcast dispatcher
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use room_relay::config::Settings;
use room_relay::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    room_relay::telemetry::init_tracing();

    info!("Starting Room Relay...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
