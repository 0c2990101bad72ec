//! Custom extractors for Axum handlers.
//!
//! These reduce boilerplate and standardize rejection bodies across the API.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
