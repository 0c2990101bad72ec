use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::ErrorResponse;
use thiserror::Error;
use uuid::Uuid;

/// Typed domain errors for user operations.
///
/// Every variant maps to exactly one HTTP status and a stable machine
/// readable error code; callers branch on the variant, never on the
/// display text.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Email '{0}' is already taken")]
    EmailAlreadyTaken(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    UnprocessableEntity(&'static str),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            UserError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "UserNotFound",
                "User not found".to_string(),
            ),
            UserError::EmailAlreadyTaken(_) => (
                StatusCode::CONFLICT,
                "EmailAlreadyTaken",
                "Email already taken".to_string(),
            ),
            UserError::InvalidPassword => (
                StatusCode::UNAUTHORIZED,
                "InvalidPassword",
                "Invalid password".to_string(),
            ),
            UserError::PasswordMismatch => (
                StatusCode::BAD_REQUEST,
                "PasswordMismatch",
                "Passwords do not match".to_string(),
            ),
            UserError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UnprocessableEntity",
                msg.to_string(),
            ),
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "An internal error occurred".to_string(),
                )
            }
            UserError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                UserError::NotFound(Uuid::nil()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                UserError::EmailAlreadyTaken("a@b.c".into())
                    .into_response()
                    .status(),
                StatusCode::CONFLICT,
            ),
            (
                UserError::InvalidPassword.into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                UserError::PasswordMismatch.into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::UnprocessableEntity("Failed to update user")
                    .into_response()
                    .status(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                UserError::Database("boom".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }
}
