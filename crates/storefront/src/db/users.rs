//! User repository.
//!
//! Accounts are provisioned by the hosted identity provider out of band;
//! this repository only reads the local mirror rows. Queries use runtime
//! binding (`query_as`) against the shared pool.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use brasswood_core::{Email, UserId, UserRole};

use super::{Lookup, RepositoryError};
use crate::models::User;

/// Repository for user lookups.
pub struct UserRepository<'a> {
    db: Option<&'a PgPool>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    subject: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_domain(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(User {
            id: self.id,
            subject: self.subject,
            email,
            role,
            created_at: self.created_at,
        })
    }
}

const USER_COLUMNS: &str = "id, subject, email, role, created_at";

impl<'a> UserRepository<'a> {
    /// Create a new user repository over the (possibly absent) store.
    #[must_use]
    pub const fn new(db: Option<&'a PgPool>) -> Self {
        Self { db }
    }

    /// Get a user by their local ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the stored email or role is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Lookup<User>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(UserRow::into_domain).transpose().map(Lookup::from)
    }

    /// Get a user by the identity-provider subject they mirror.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the stored email or role is invalid.
    pub async fn get_by_subject(&self, subject: &str) -> Result<Lookup<User>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE subject = $1"
        ))
        .bind(subject)
        .fetch_optional(pool)
        .await?;

        row.map(UserRow::into_domain).transpose().map(Lookup::from)
    }

    /// Get just a user's email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the stored email is invalid.
    pub async fn get_email(&self, id: UserId) -> Result<Lookup<Email>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let email = sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        email
            .map(|raw| {
                Email::parse(&raw).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
                })
            })
            .transpose()
            .map(Lookup::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_degrades_to_unconfigured() {
        let repo = UserRepository::new(None);

        assert_eq!(
            repo.get_email(UserId::new(1)).await.unwrap(),
            Lookup::Unconfigured
        );
        assert!(matches!(
            repo.get_by_id(UserId::new(1)).await.unwrap(),
            Lookup::Unconfigured
        ));
        assert!(matches!(
            repo.get_by_subject("subject").await.unwrap(),
            Lookup::Unconfigured
        ));
    }
}
