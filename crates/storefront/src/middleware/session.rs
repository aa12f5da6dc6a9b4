//! Session middleware configuration.
//!
//! Sessions are signed cookies backed by `PostgreSQL` when the store is
//! configured. Without a store, sessions fall back to an in-memory map:
//! they then don't survive a restart, but session middleware never becomes
//! the reason an unconfigured deployment fails to boot.

use axum::Router;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bw_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Wrap the router in a session layer over whichever backend is available.
///
/// The two backends produce differently-typed layers, so the branch happens
/// here where `Router::layer` erases the difference.
///
/// # Arguments
///
/// * `router` - The route tree to wrap
/// * `db` - `PostgreSQL` connection pool, if the store is configured
/// * `config` - Storefront configuration (for the signing secret)
#[must_use]
pub fn with_session_layer(
    router: Router<AppState>,
    db: Option<&PgPool>,
    config: &StorefrontConfig,
) -> Router<AppState> {
    match db {
        Some(pool) => {
            // Note: the session table is created by migration, not here
            router.layer(session_layer(PostgresStore::new(pool.clone()), config))
        }
        None => router.layer(session_layer(MemoryStore::default(), config)),
    }
}

/// Build the session layer over a concrete store.
fn session_layer<Store: SessionStore>(
    store: Store,
    config: &StorefrontConfig,
) -> SessionManagerLayer<Store, SignedCookie> {
    // Key derivation needs >= 32 bytes of master material; config validation
    // enforces the minimum secret length before we get here.
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    // Secure cookies in production (HTTPS base URL)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
