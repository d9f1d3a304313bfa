//! Common Test Utilities
//!
//! In-memory transport and a test application wired like the real server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use room_relay::config::Settings;
use room_relay::domain::{ConnectionId, ConnectionState, FrameSink, FrameSource};
use room_relay::presentation::http::routes::create_router;
use room_relay::shared::error::RelayError;
use room_relay::startup::AppState;

/// How long to wait for a frame that should arrive.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before concluding that nothing will arrive.
pub const SILENCE_WINDOW: Duration = Duration::from_millis(100);

/// Test application with a running dispatcher
pub struct TestApp {
    pub state: AppState,
    dispatcher: JoinHandle<()>,
}

impl TestApp {
    /// Create a new test application with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::defaults().expect("default settings"))
    }

    pub fn with_settings(settings: Settings) -> Self {
        let (state, dispatcher) = AppState::build(settings);
        Self { state, dispatcher }
    }

    /// The real router over this app's state
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Attach a client and wait until it is registered
    pub async fn connect(&self) -> TestClient {
        let id = ConnectionId::new();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        let sink = Arc::new(TestSink::new(frames_tx));

        let connections = self.state.connections.clone();
        let task_sink: Arc<dyn FrameSink> = sink.clone();
        let task = tokio::spawn(async move {
            connections
                .run(id, ChannelSource(inbound_rx), task_sink)
                .await
        });

        while !self.state.registry.contains(id) {
            tokio::task::yield_now().await;
        }

        TestClient {
            id,
            inbound: Some(inbound_tx),
            frames: frames_rx,
            sink,
            task,
        }
    }

    /// Stop the dispatcher, as if it had crashed
    pub async fn stop_dispatcher(&mut self) {
        self.dispatcher.abort();
        let _ = (&mut self.dispatcher).await;
    }
}

/// Collect a response body as text
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Read half fed by the test through a channel. Dropping the sender is a hang-up.
pub struct ChannelSource(mpsc::UnboundedReceiver<Vec<u8>>);

#[async_trait]
impl FrameSource for ChannelSource {
    async fn read_frame(&mut self) -> Result<Vec<u8>, RelayError> {
        self.0
            .recv()
            .await
            .ok_or_else(|| RelayError::ReadFailure("client hung up".into()))
    }
}

/// Write half that forwards frames to the test, or fails on demand.
pub struct TestSink {
    frames: mpsc::UnboundedSender<String>,
    fail_writes: AtomicBool,
    closed: AtomicBool,
}

impl TestSink {
    fn new(frames: mpsc::UnboundedSender<String>) -> Self {
        Self {
            frames,
            fail_writes: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameSink for TestSink {
    async fn write_frame(&self, frame: &str) -> Result<(), RelayError> {
        if self.fail_writes.load(Ordering::SeqCst) || self.is_closed() {
            return Err(RelayError::WriteFailure("broken pipe".into()));
        }
        self.frames
            .send(frame.to_string())
            .map_err(|e| RelayError::WriteFailure(e.to_string()))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// One simulated client connection
pub struct TestClient {
    pub id: ConnectionId,
    inbound: Option<mpsc::UnboundedSender<Vec<u8>>>,
    frames: mpsc::UnboundedReceiver<String>,
    pub sink: Arc<TestSink>,
    task: JoinHandle<ConnectionState>,
}

impl TestClient {
    /// Send a raw payload
    pub fn send(&self, payload: &str) {
        if let Some(inbound) = &self.inbound {
            inbound
                .send(payload.as_bytes().to_vec())
                .expect("connection handler is gone");
        }
    }

    /// Move to `room` and wait for the echo that proves it
    pub async fn join_room(&mut self, room: &str) {
        self.send(&format!(r#"{{"clientName":"joiner","text":"joined","room":"{room}"}}"#));
        let echo = self.next_frame().await;
        assert!(echo.contains("joined"), "unexpected frame: {echo}");
    }

    /// Wait for the next delivered frame
    pub async fn next_frame(&mut self) -> String {
        tokio::time::timeout(DELIVERY_TIMEOUT, self.frames.recv())
            .await
            .expect("timed out waiting for a frame")
            .expect("frame channel closed")
    }

    /// Assert that nothing arrives for a short while
    pub async fn assert_silent(&mut self) {
        if let Ok(Some(frame)) = tokio::time::timeout(SILENCE_WINDOW, self.frames.recv()).await {
            panic!("unexpected frame: {frame}");
        }
    }

    /// Make every further write to this client fail
    pub fn break_writes(&self) {
        self.sink.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Hang up and wait for the handler to finish
    pub async fn disconnect(mut self) -> ConnectionState {
        self.inbound.take();
        self.finished().await
    }

    /// Wait for the handler to finish on its own
    pub async fn finished(self) -> ConnectionState {
        tokio::time::timeout(DELIVERY_TIMEOUT, self.task)
            .await
            .expect("timed out waiting for the handler")
            .expect("handler panicked")
    }
}
