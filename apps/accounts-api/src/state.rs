//! Shared application state passed to request handlers.

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloned per handler; everything inside is either an Arc-backed pool or
/// small owned data, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
    /// Stateless JWT verifier for the auth middleware
    pub jwt_auth: JwtAuth,
}
