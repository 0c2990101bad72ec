//! Stateless JWT bearer authentication.
//!
//! Every route under the API surface is guarded by [`jwt_auth_middleware`];
//! token verification is purely cryptographic (HS256 signature + expiry),
//! with no session store behind it.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, ACCESS_TOKEN_TTL};
pub use middleware::jwt_auth_middleware;
