use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity - matches the SQL schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// User display name
    pub name: String,
    /// User email (unique)
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user (password is hashed by the service layer)
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub confirm_password: String,
}

/// Response after a successful create: identity only, never the hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedUser {
    pub name: String,
    pub email: String,
}

/// DTO for updating name/email of an existing user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
}

/// Response naming the record an update or delete touched
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AffectedUser {
    pub id: Uuid,
}

/// DTO for the change-password flow
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Generic success message body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_user_serialization_skips_password_hash() {
        let user = User::new(
            "Test User".to_string(),
            "test@example.com".to_string(),
            "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        let a = User::new("A".into(), "a@example.com".into(), "h".into());
        let b = User::new("B".into(), "b@example.com".into(), "h".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let req = CreateUserRequest {
            name: "Test".to_string(),
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_short_password() {
        let req = CreateUserRequest {
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_empty_name() {
        let req = UpdateUserRequest {
            name: String::new(),
            email: "test@example.com".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
