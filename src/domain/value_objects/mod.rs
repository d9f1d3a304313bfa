//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **ConnectionId**: Opaque identity of a live transport session

mod connection_id;

pub use connection_id::*;
