use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence.
///
/// Intentionally dumb: it translates domain operations into store calls and
/// reports outcomes (absent record as `None`, mutations as affected-row
/// counts). Business rules live in the service layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID; absent records are `None`, never an error
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Persist a new user. A duplicate email surfaces as
    /// [`UserError::EmailAlreadyTaken`] - the store's unique constraint is
    /// the authoritative guard, the service pre-check is only a fast path.
    async fn create(&self, user: User) -> UserResult<User>;

    /// Update name and email, returning the number of affected records
    async fn update_fields(&self, id: Uuid, name: &str, email: &str) -> UserResult<u64>;

    /// Replace the stored password hash, returning the affected count
    async fn update_password(&self, id: Uuid, password_hash: &str) -> UserResult<u64>;

    /// Delete a user by ID, returning the affected count
    async fn delete(&self, id: Uuid) -> UserResult<u64>;

    /// Check whether any record has exactly this email
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for tests and local runs)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyTaken(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn update_fields(&self, id: Uuid, name: &str, email: &str) -> UserResult<u64> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.id != id && u.email == email)
        {
            return Err(UserError::EmailAlreadyTaken(email.to_string()));
        }

        match users.get_mut(&id) {
            Some(user) => {
                user.name = name.to_string();
                user.email = email.to_string();
                user.updated_at = Utc::now();

                tracing::info!(user_id = %id, "Updated user");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> UserResult<u64> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();

                tracing::info!(user_id = %id, "Updated user password");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> UserResult<u64> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User::new(name.to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(user("Test User", "test@example.com")).await.unwrap();
        assert_eq!(created.email, "test@example.com");

        let fetched = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_id_miss_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();

        repo.create(user("User 1", "test@example.com")).await.unwrap();
        let result = repo.create(user("User 2", "test@example.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyTaken(_))));
    }

    #[tokio::test]
    async fn test_email_check_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();

        repo.create(user("User", "test@example.com")).await.unwrap();

        assert!(repo.email_exists("test@example.com").await.unwrap());
        assert!(!repo.email_exists("TEST@EXAMPLE.COM").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_fields_reports_affected_count() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("Before", "before@example.com")).await.unwrap();

        let affected = repo
            .update_fields(created.id, "After", "after@example.com")
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "After");
        assert_eq!(fetched.email, "after@example.com");
        // Password untouched by a field update
        assert_eq!(fetched.password_hash, "hash");

        let missing = repo
            .update_fields(Uuid::now_v7(), "X", "x@example.com")
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }

    #[tokio::test]
    async fn test_update_fields_rejects_taken_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("A", "a@example.com")).await.unwrap();
        let b = repo.create(user("B", "b@example.com")).await.unwrap();

        let result = repo.update_fields(b.id, "B", "a@example.com").await;
        assert!(matches!(result, Err(UserError::EmailAlreadyTaken(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_affected_count() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("Doomed", "doomed@example.com")).await.unwrap();

        assert_eq!(repo.delete(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(created.id).await.unwrap(), 0);
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_creation() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("First", "first@example.com")).await.unwrap();
        repo.create(user("Second", "second@example.com")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at <= all[1].created_at);
    }
}
