//! HTTP Layer
//!
//! Router and operational endpoints.

pub mod handlers;
pub mod routes;
