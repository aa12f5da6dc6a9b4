//! Notification API handlers.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::db::notifications::NotificationRepository;
use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Mark all of the caller's notifications as read.
///
/// Idempotent: repeating the call changes nothing further. Without a valid
/// session the `RequireAuth` extractor answers 401 before this body runs,
/// so no mutation can happen unauthenticated.
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let updated = NotificationRepository::new(state.db())
        .mark_all_read(user.id)
        .await?;

    tracing::debug!(user_id = %user.id, updated, "marked notifications read");

    Ok(Json(json!({ "ok": true })))
}
