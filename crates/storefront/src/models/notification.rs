//! Notification domain type.

use chrono::{DateTime, Utc};

use brasswood_core::{NotificationId, UserId};

/// An account notification.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique notification ID.
    pub id: NotificationId,
    /// Owning user.
    pub user_id: UserId,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// When the notification was read; `None` means unread.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the notification is still unread.
    #[must_use]
    pub const fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}
