//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::{IdentityClient, IdentityError};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateInitError {
    #[error("identity client: {0}")]
    Identity(#[from] IdentityError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The database pool and identity client are
/// both optional: they exist exactly when their configuration does, and
/// everything downstream checks for absence instead of assuming them.
/// Read-only after construction - requests share it, nothing mutates it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    db: Option<PgPool>,
    identity: Option<IdentityClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `db` - `PostgreSQL` connection pool, if the store is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the identity provider is configured but its
    /// client cannot be constructed.
    pub fn new(config: StorefrontConfig, db: Option<PgPool>) -> Result<Self, StateInitError> {
        let identity = config
            .identity
            .as_ref()
            .map(IdentityClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                identity,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the database pool, if the store is configured.
    #[must_use]
    pub fn db(&self) -> Option<&PgPool> {
        self.inner.db.as_ref()
    }

    /// Get the identity provider client, if configured.
    #[must_use]
    pub fn identity(&self) -> Option<&IdentityClient> {
        self.inner.identity.as_ref()
    }
}

/// Test fixtures shared by unit tests across the crate.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::net::IpAddr;

    use secrecy::SecretString;

    use super::{AppState, StorefrontConfig};

    /// A fully-degraded config: no database, no identity provider.
    pub fn unconfigured_config() -> StorefrontConfig {
        StorefrontConfig {
            database_url: None,
            host: "127.0.0.1".parse::<IpAddr>().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("kJ8#mP2$vQ9@xR4!wS7&yT1*zU5^aV3%"),
            identity: None,
            sentry_dsn: None,
        }
    }

    /// State over the degraded config.
    pub fn unconfigured_state() -> AppState {
        AppState::new(unconfigured_config(), None).unwrap()
    }
}
