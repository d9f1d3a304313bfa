//! # Domain Services
//!
//! Contracts for behavior that doesn't belong to a single entity.
//!
//! ## Services
//!
//! - **Renderer**: Produces the per-recipient view of a message

mod renderer;

pub use renderer::*;
