//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Catalog
//! GET  /categories             - Category listing
//! GET  /categories/{slug}      - Category detail with products
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action (rate limited)
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth; pages redirect to login)
//! GET  /account                - Account overview
//! GET  /account/orders         - Order history
//! GET  /account/orders/{id}    - Order detail
//! GET  /account/proformas      - Proforma list
//! GET  /account/proformas/{id} - Proforma detail
//! GET  /account/notifications  - Notification list
//!
//! # Shared proformas (no auth; token is the authorization)
//! GET  /share/{token}          - Proforma by share token
//!
//! # API (requires auth; 401 JSON without a session)
//! POST /api/notifications/mark-all-read
//! ```
//!
//! Every handler follows the same terminal-state sequence: resolve
//! parameters (bad ones are "not found"), resolve the session (absent is
//! "unauthorized"), run the ownership-scoped query, render. No retries.

pub mod account;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod home;
pub mod share;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
///
/// The login action is rate limited; the login page and logout are not.
pub fn auth_routes() -> Router<AppState> {
    let login_action = Router::new()
        .route("/login", post(auth::login))
        .route_layer(login_rate_limiter());

    Router::new()
        .route("/login", get(auth::login_page))
        .route("/logout", post(auth::logout))
        .merge(login_action)
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/{slug}", get(catalog::show))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order_detail))
        .route("/proformas", get(account::proformas))
        .route("/proformas/{id}", get(account::proforma_detail))
        .route("/notifications", get(account::notifications))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/notifications/mark-all-read",
        post(api::notifications::mark_all_read),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/categories", catalog_routes())
        .nest("/account", account_routes())
        .route("/share/{token}", get(share::show))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use brasswood_core::ShareToken;

    use crate::middleware::with_session_layer;
    use crate::state::test_support::unconfigured_state;

    /// The full route tree over a fully-degraded deployment: no store, no
    /// identity provider, in-memory sessions. Everything must still answer.
    fn test_app() -> Router {
        let state = unconfigured_state();
        let router = with_session_layer(super::routes(), None, state.config());
        router.with_state(state)
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_account_pages_redirect_anonymous_users_to_login() {
        let paths = [
            "/account",
            "/account/orders",
            "/account/orders/7",
            "/account/proformas",
            "/account/proformas/7",
            "/account/notifications",
        ];

        for path in paths {
            let response = test_app().oneshot(get(path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
            assert_eq!(response.headers()[header::LOCATION], "/auth/login");
        }
    }

    #[tokio::test]
    async fn test_mark_all_read_without_session_is_401_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/notifications/mark-all-read")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_string(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_share_with_unknown_token_renders_empty_state() {
        // A well-formed token that matches nothing (the store is absent, so
        // every token matches nothing)
        let token = ShareToken::generate();
        let response = test_app()
            .oneshot(get(&format!("/share/{token}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_share_with_malformed_token_renders_empty_state() {
        let response = test_app()
            .oneshot(get("/share/definitely-not-a-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_home_renders_without_store() {
        let response = test_app().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_category_listing_renders_empty_without_store() {
        let response = test_app().oneshot(get("/categories")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("restocked"));
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let response = test_app()
            .oneshot(get("/categories/walnut-shelving"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_page_notes_unavailable_signin() {
        let response = test_app().oneshot(get("/auth/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_login_post_degrades_without_provider() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("x-forwarded-for", "203.0.113.7")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from("email=buyer%40example.com&password=pw"))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("unavailable"));
    }
}
