//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use room_relay::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Relay will listen on {}", settings.server_addr());
//! ```

mod settings;

pub use settings::*;
