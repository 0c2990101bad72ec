//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by Axum services in this
//! workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT bearer authentication
//! - **[`server`]**: server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured error response bodies
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{jwt_auth_middleware, JwtAuth, JwtClaims, JwtConfig, ACCESS_TOKEN_TTL};

pub use server::{
    create_app, create_production_app, create_router, health_router, shutdown_signal,
    HealthResponse,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::ErrorResponse;

pub use extractors::{UuidPath, ValidatedJson};
