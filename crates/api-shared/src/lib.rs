//! # API Shared
//!
//! Shared utilities and definitions for the BECC HTTP API.
//!
//! Contains:
//! - Request/response bodies with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//! - API key validation for the dashboard
//!
//! Used by `api-rest` and the CLI for common functionality.

pub mod auth;
pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

/// Header carrying the dashboard API key.
pub const API_KEY_HEADER: &str = "x-api-key";
