use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    AffectedUser, ChangePasswordRequest, CreateUserRequest, CreatedUser, UpdateUserRequest, User,
};
use crate::repository::UserRepository;

/// Service layer for User business logic.
///
/// Owns the rules the transport must not know about: email uniqueness,
/// password confirmation, hashing, and the mapping of affected-row counts
/// to outcomes.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all users
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Create a new user.
    ///
    /// Order of checks matters for the error the caller sees: a taken email
    /// wins over a password mismatch.
    pub async fn create_user(&self, input: CreateUserRequest) -> UserResult<CreatedUser> {
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::EmailAlreadyTaken(input.email));
        }

        if input.password != input.confirm_password {
            return Err(UserError::PasswordMismatch);
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.name, input.email, password_hash);

        let created = match self.repository.create(user).await {
            Ok(created) => created,
            // The unique constraint caught a race the pre-check missed
            Err(UserError::EmailAlreadyTaken(email)) => {
                return Err(UserError::EmailAlreadyTaken(email));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create user");
                return Err(UserError::UnprocessableEntity("Failed to create user"));
            }
        };

        Ok(CreatedUser {
            name: created.name,
            email: created.email,
        })
    }

    /// Update name and email of an existing user. Zero affected rows means
    /// the update failed.
    pub async fn update_user(&self, id: Uuid, input: UpdateUserRequest) -> UserResult<AffectedUser> {
        let affected = self
            .repository
            .update_fields(id, &input.name, &input.email)
            .await?;

        if affected == 0 {
            return Err(UserError::UnprocessableEntity("Failed to update user"));
        }

        Ok(AffectedUser { id })
    }

    /// Delete a user. Zero affected rows means the delete failed.
    pub async fn delete_user(&self, id: Uuid) -> UserResult<AffectedUser> {
        let affected = self.repository.delete(id).await?;

        if affected == 0 {
            return Err(UserError::UnprocessableEntity("Failed to delete user"));
        }

        Ok(AffectedUser { id })
    }

    /// Change a user's password.
    ///
    /// Checks run in a fixed order: the user must exist (404), the old
    /// password must verify against the stored hash (401), and the new
    /// password must match its confirmation (400).
    pub async fn change_password(&self, id: Uuid, input: ChangePasswordRequest) -> UserResult<()> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if !self.verify_password(&input.old_password, &user.password_hash)? {
            return Err(UserError::InvalidPassword);
        }

        if input.new_password != input.confirm_new_password {
            return Err(UserError::PasswordMismatch);
        }

        let password_hash = self.hash_password(&input.new_password)?;

        let affected = self.repository.update_password(id, &password_hash).await?;
        if affected == 0 {
            // The user vanished between the fetch and the write
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
