//! Notification repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use brasswood_core::{NotificationId, UserId};

use super::RepositoryError;
use crate::models::Notification;

/// Repository for ownership-scoped notification reads and the one bulk
/// mutation the storefront performs (mark-all-read).
pub struct NotificationRepository<'a> {
    db: Option<&'a PgPool>,
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: NotificationId,
    user_id: UserId,
    title: String,
    body: String,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
            read_at: row.read_at,
            created_at: row.created_at,
        }
    }
}

impl<'a> NotificationRepository<'a> {
    /// Create a new notification repository over the (possibly absent) store.
    #[must_use]
    pub const fn new(db: Option<&'a PgPool>) -> Self {
        Self { db }
    }

    /// List a user's notifications, unread first, then newest first.
    ///
    /// Returns an empty list when the store is unconfigured.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, user_id, title, body, read_at, created_at
             FROM notifications
             WHERE user_id = $1
             ORDER BY (read_at IS NULL) DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    /// Count a user's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unread_count_for_user(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(0);
        };

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Mark all of a user's notifications as read.
    ///
    /// Idempotent: the filter only touches unread rows, so a second call
    /// matches nothing and changes nothing. Scoped to one user's set; other
    /// users' notifications are untouched by construction. Returns the
    /// number of rows updated (0 when the store is unconfigured).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(0);
        };

        let result = sqlx::query(
            "UPDATE notifications
             SET read_at = now()
             WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_degrades_without_error() {
        let repo = NotificationRepository::new(None);

        assert!(repo.list_for_user(UserId::new(1)).await.unwrap().is_empty());
        assert_eq!(repo.unread_count_for_user(UserId::new(1)).await.unwrap(), 0);
        // The mutation is a no-op, not an error
        assert_eq!(repo.mark_all_read(UserId::new(1)).await.unwrap(), 0);
    }
}
