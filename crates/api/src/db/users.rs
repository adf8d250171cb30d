//! User repository: the credential store consulted by the access gate.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bistro_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::User;

/// Raw `users` row; mapped into [`User`] after validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    name: Option<String>,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_domain(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = self
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
            })?;

        Ok(User {
            id: UserId::new(self.id),
            email,
            name: self.name,
            role,
            created_at: self.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a user if the email is not already taken.
    ///
    /// Returns `None` when a record for the email already exists; the losing
    /// side of a concurrent duplicate registration observes the same no-op
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_if_absent(
        &self,
        email: &Email,
        name: Option<&str>,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, name, role, created_at
            ",
        )
        .bind(email.as_str())
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, name, role, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    /// List every registered user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row is invalid.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, name, role, created_at
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_domain).collect()
    }

    /// Whether the stored record for this email currently carries the admin
    /// role.
    ///
    /// This is a fresh read on every call; the gate never caches roles
    /// across requests, since a token can outlive a role change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_admin(&self, email: &Email) -> Result<bool, RepositoryError> {
        let is_admin = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE email = $1 AND role = 'admin'
            )
            ",
        )
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(is_admin)
    }

    /// Apply a partial update to a user's name and/or role.
    ///
    /// Fields passed as `None` are left unchanged. Returns the number of
    /// rows updated (0 if the user does not exist).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: UserId,
        name: Option<&str>,
        role: Option<Role>,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                role = COALESCE($3, role)
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(name)
        .bind(role.map(Role::as_str))
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a user by ID. Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
