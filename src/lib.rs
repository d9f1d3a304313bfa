//! # Room Relay Library
//!
//! This crate provides a real-time multi-room chat relay:
//! - WebSocket endpoint for persistent client connections
//! - Per-room fan-out through a single bounded broadcast queue
//! - Per-recipient rendering that marks the sender's own messages
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Message entity, connection identity and transport contracts
//! - **Application Layer**: Normalizer, dispatcher and connection handler
//! - **Infrastructure Layer**: Connection registry, HTML renderer, metrics
//! - **Presentation Layer**: HTTP routes and the WebSocket endpoint
//!
//! ## Module Structure
//!
//! ```text
//! room_relay/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and traits
//! +-- application/    Relay services and inbound DTOs
//! +-- infrastructure/ Registry, rendering, metrics
//! +-- presentation/   HTTP routes and WebSocket handlers
//! +-- shared/         Error types
//! ```

// Configuration module
pub mod config;

// Domain layer - Core types
pub mod domain;

// Application layer - Relay services
pub mod application;

// Infrastructure layer - In-process implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
