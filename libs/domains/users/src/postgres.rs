//! PostgreSQL implementation of [`UserRepository`] using SeaORM raw
//! statements.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            UUID PRIMARY KEY,
//!     name          TEXT NOT NULL,
//!     email         TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL,
//!     updated_at    TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Map a SeaORM error, treating unique-constraint violations on the email
/// column as [`UserError::EmailAlreadyTaken`]. The constraint is the
/// authoritative duplicate check; the service-level lookup is only a fast
/// path that can race with concurrent inserts.
fn map_db_err(e: sea_orm::DbErr, email: &str) -> UserError {
    let err_str = e.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        UserError::EmailAlreadyTaken(email.to_string())
    } else {
        UserError::Database(err_str)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let sql = "SELECT * FROM users ORDER BY created_at";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let sql = "SELECT * FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: User) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.name.clone().into(),
                user.email.clone().into(),
                user.password_hash.clone().into(),
                user.created_at.into(),
                user.updated_at.into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, &user.email))?
            .ok_or(UserError::UnprocessableEntity("Failed to create user"))?;

        Ok(row.into())
    }

    async fn update_fields(&self, id: Uuid, name: &str, email: &str) -> UserResult<u64> {
        let sql = "UPDATE users SET name = $2, email = $3, updated_at = NOW() WHERE id = $1";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [id.into(), name.into(), email.into()],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| map_db_err(e, email))?;

        Ok(result.rows_affected())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> UserResult<u64> {
        let sql = "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [id.into(), password_hash.into()],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> UserResult<u64> {
        let sql = "DELETE FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        // Exact match on purpose: emails are compared case-sensitively
        let sql = "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) as exists";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [email.into()]);

        #[derive(FromQueryResult)]
        struct ExistsResult {
            exists: bool,
        }

        let result = ExistsResult::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(result.map(|r| r.exists).unwrap_or(false))
    }
}
