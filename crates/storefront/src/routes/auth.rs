//! Authentication route handlers.
//!
//! Credentials are verified against the hosted identity provider; the
//! storefront never sees a password hash. A successful verification maps
//! the provider subject onto the local `users` mirror row and stores the
//! minimal identity in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::db::users::UserRepository;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::IdentityError;
use crate::state::AppState;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for message display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub notice: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub signin_available: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    // Already signed in - nothing to do here
    if user.is_some() {
        return Redirect::to("/account").into_response();
    }

    LoginTemplate {
        error: None,
        notice: query.notice,
        signin_available: state.config().is_identity_configured(),
    }
    .into_response()
}

/// Handle login form submission.
///
/// With the identity provider unconfigured this re-renders the form with a
/// notice instead of failing - sign-in is degraded, not broken.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Some(identity) = state.identity() else {
        return login_error("Sign-in is currently unavailable.", false);
    };

    let verified = match identity.verify_password(&form.email, &form.password).await {
        Ok(verified) => verified,
        Err(IdentityError::InvalidCredentials) => {
            return login_error("Invalid email or password.", true);
        }
        Err(e) => {
            // Timeouts and provider failures are retryable from the user's
            // point of view; log the distinction, show one message
            tracing::warn!("Identity provider error during login: {e}");
            return login_error("Sign-in is temporarily unavailable. Please try again.", true);
        }
    };

    let user = match UserRepository::new(state.db())
        .get_by_subject(&verified.subject)
        .await
    {
        Ok(lookup) => lookup.into_option(),
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!("Failed to load user for login: {e}");
            return login_error("Sign-in is temporarily unavailable. Please try again.", true);
        }
    };

    // Provider knows the account but the store has no mirror row (or no
    // store at all): treat like bad credentials, don't leak the difference
    let Some(user) = user else {
        return login_error("Invalid email or password.", true);
    };

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
    };

    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!("Failed to write session: {e}");
        return login_error("Sign-in is temporarily unavailable. Please try again.", true);
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "user signed in");

    Redirect::to("/account").into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();

    Redirect::to("/").into_response()
}

/// Re-render the login form with an error message.
fn login_error(message: &str, signin_available: bool) -> Response {
    LoginTemplate {
        error: Some(message.to_string()),
        notice: None,
        signin_available,
    }
    .into_response()
}
