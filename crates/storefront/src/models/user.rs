//! User domain type.
//!
//! Accounts are provisioned by the hosted identity provider; the local row
//! mirrors the provider subject and is read-only from the storefront's
//! perspective.

use chrono::{DateTime, Utc};

use brasswood_core::{Email, UserId, UserRole};

/// A storefront account.
#[derive(Debug, Clone)]
pub struct User {
    /// Local database ID.
    pub id: UserId,
    /// Identity-provider subject this row mirrors.
    pub subject: String,
    /// User's email address.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
    /// When the local mirror row was created.
    pub created_at: DateTime<Utc>,
}
