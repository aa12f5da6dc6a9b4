//! Database operations for the storefront `PostgreSQL` store.
//!
//! # Database: `brasswood_storefront`
//!
//! ## Tables
//!
//! - `users` - Local mirror of identity-provider accounts (read-only here)
//! - `sessions` - Tower-sessions storage
//! - `categories`, `products` - Public catalog
//! - `orders`, `order_items` - Confirmed orders
//! - `proformas`, `proforma_items` - Quotes, addressable by share token
//! - `notifications` - Per-user account notifications
//!
//! The store is optional: when `STOREFRONT_DATABASE_URL` is absent the
//! application runs without it and every repository degrades to empty
//! results. Repositories therefore take `Option<&PgPool>` and report the
//! three distinct conditions (unconfigured / not found / found) through
//! [`Lookup`]; only route handlers collapse them into responses.
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and are applied out of
//! band with `sqlx migrate run`; the server never migrates on startup.

pub mod catalog;
pub mod notifications;
pub mod orders;
pub mod proformas;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::StorefrontConfig;

/// Upper bound for any single statement, applied per pooled connection.
///
/// The store is a managed service and normally answers in milliseconds; the
/// bound exists so a wedged query cannot hold a request open indefinitely.
const STATEMENT_TIMEOUT: &str = "10s";

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Result of a single-record, ownership-scoped lookup.
///
/// Three conditions share the external shape "nothing to render" but mean
/// different things internally, so they stay distinct until a route handler
/// collapses them:
///
/// - [`Lookup::Unconfigured`] - the store itself is absent; a degraded
///   deployment, not a miss.
/// - [`Lookup::NotFound`] - no row matched the id *and* owner filter. A row
///   owned by someone else lands here too; callers cannot tell the
///   difference, by construction.
/// - [`Lookup::Found`] - the caller owns the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The data store is not configured.
    Unconfigured,
    /// No record matched for this owner.
    NotFound,
    /// The record, owned by the requester.
    Found(T),
}

impl<T> Lookup<T> {
    /// Collapse to an `Option`, erasing why the record is absent.
    ///
    /// This is the endpoint-boundary conversion: pages and API routes render
    /// one "not found" outcome for every absent case.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(record) => Some(record),
            Self::Unconfigured | Self::NotFound => None,
        }
    }

    /// Map the found value, preserving the absent cases.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(record) => Lookup::Found(f(record)),
            Self::Unconfigured => Lookup::Unconfigured,
            Self::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    /// Convert a `fetch_optional` result; `None` means no matching row.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

/// Create the `PostgreSQL` connection pool, if the store is configured.
///
/// Returns `None` without error when no database URL is present - callers
/// treat the absent pool as "feature unavailable". The pool is created once
/// at startup and shared read-only for the process lifetime.
///
/// # Errors
///
/// Returns `sqlx::Error` if a URL is configured but the connection cannot
/// be established - an explicitly configured store that does not answer is
/// a deployment failure, not graceful degradation.
pub async fn connect(config: &StorefrontConfig) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(database_url) = config.database_url.as_ref() else {
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Bound every statement server-side (see STATEMENT_TIMEOUT)
                sqlx::query(&format!("SET statement_timeout = '{STATEMENT_TIMEOUT}'"))
                    .execute(conn)
                    .await?;
                Ok(())
            })
        })
        .connect(database_url.expose_secret())
        .await?;

    Ok(Some(pool))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_into_option_collapses_absent_cases() {
        assert_eq!(Lookup::<i32>::Unconfigured.into_option(), None);
        assert_eq!(Lookup::<i32>::NotFound.into_option(), None);
        assert_eq!(Lookup::Found(7).into_option(), Some(7));
    }

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(Lookup::from(Some(1)), Lookup::Found(1));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn test_lookup_map_preserves_absent_cases() {
        assert_eq!(Lookup::Found(2).map(|n| n * 2), Lookup::Found(4));
        assert_eq!(
            Lookup::<i32>::Unconfigured.map(|n| n * 2),
            Lookup::Unconfigured
        );
        assert_eq!(Lookup::<i32>::NotFound.map(|n| n * 2), Lookup::NotFound);
    }
}
