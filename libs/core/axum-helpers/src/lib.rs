//! # Axum Helpers
//!
//! Shared utilities for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`errors`]**: structured error responses (`{"message": "..."}`)
//! - **[`extractors`]**: custom extractors (UUID path, JSON body)
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::{AppJson, UuidPath};

// Re-export server types
pub use server::{create_app, create_router, health_router, shutdown_signal, HealthResponse};
