//! # API Shared
//!
//! Shared definitions for the HealthAI APIs.
//!
//! Contains:
//! - Request and response bodies (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the workspace runner for common functionality.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
