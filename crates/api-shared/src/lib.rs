//! # API Shared
//!
//! Shared request/response types for the dashboard HTTP API.
//!
//! Contains:
//! - JSON wire types (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
