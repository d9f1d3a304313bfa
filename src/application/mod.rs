//! Application Layer
//!
//! Normalization, dispatch and the per-connection control loop. This layer
//! sits between the websocket transport and the domain types.

pub mod dto;
pub mod services;
