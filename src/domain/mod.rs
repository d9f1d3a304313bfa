//! # Domain Layer
//!
//! The domain layer contains the core types of the relay.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: ChatMessage, BroadcastEvent, connection contracts
//! - **value_objects**: Immutable value types (ConnectionId)
//! - **services**: Rendering contract
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Transport and rendering are traits implemented elsewhere

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
