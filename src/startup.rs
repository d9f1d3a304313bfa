//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::application::services::{broadcast_queue, BroadcastSender, ConnectionHandler, Dispatcher};
use crate::config::Settings;
use crate::infrastructure::registry::ConnectionRegistry;
use crate::infrastructure::rendering::HtmlRenderer;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};
use crate::shared::error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub connections: ConnectionHandler,
    pub queue: BroadcastSender,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the relay pipeline and spawn its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(settings: Settings) -> (Self, JoinHandle<()>) {
        let registry = Arc::new(ConnectionRegistry::new());
        let (queue, events) = broadcast_queue(settings.relay.queue_capacity);

        let dispatcher = Dispatcher::new(Arc::clone(&registry), Arc::new(HtmlRenderer::new()));
        let dispatcher_task = dispatcher.spawn(events);

        let connections = ConnectionHandler::new(Arc::clone(&registry), queue.clone())
            .with_idle_timeout(settings.relay.idle_timeout());

        let state = Self {
            registry,
            connections,
            queue,
            settings: Arc::new(settings),
        };
        (state, dispatcher_task)
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    dispatcher_task: JoinHandle<()>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        health::init_server_start();

        let addr = settings.server.socket_addr()?;
        let cors = create_cors_layer(&settings.cors);

        let (state, dispatcher_task) = AppState::build(settings);
        tracing::info!(
            queue_capacity = state.queue.max_capacity(),
            "Broadcast dispatcher spawned"
        );

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(create_trace_layer())
            .layer(cors);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            dispatcher_task,
        })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        let result = axum::serve(self.listener, self.router).await;
        self.dispatcher_task.abort();
        result?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
