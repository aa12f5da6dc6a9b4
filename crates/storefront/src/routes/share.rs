//! Shared proforma route handler.
//!
//! `/share/{token}` is the one route where possession of the token *is* the
//! authorization: no session is consulted. Whatever goes wrong - malformed
//! token, unknown token, expired token, even a data-layer failure - the
//! response is the same benign "unavailable" page with status 200. Probing
//! this endpoint teaches an attacker nothing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use brasswood_core::ShareToken;

use crate::db::Lookup;
use crate::db::proformas::ProformaRepository;
use crate::filters;
use crate::routes::account::{ProformaItemView, ProformaView};
use crate::state::AppState;

/// Shared proforma page template.
#[derive(Template, WebTemplate)]
#[template(path = "share/proforma.html")]
pub struct SharedProformaTemplate {
    pub proforma: ProformaView,
    pub items: Vec<ProformaItemView>,
    pub notes: String,
}

/// Empty-state template for any token that does not resolve.
#[derive(Template, WebTemplate)]
#[template(path = "share/unavailable.html")]
pub struct ShareUnavailableTemplate;

/// Display a proforma by share token.
#[instrument(skip(state, token))]
pub async fn show(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    // Shape check first: malformed tokens never reach the database
    let Ok(token) = ShareToken::parse(&token) else {
        return ShareUnavailableTemplate.into_response();
    };

    let repo = ProformaRepository::new(state.db());

    let proforma = match repo.get_by_token(&token).await {
        Ok(Lookup::Found(proforma)) => proforma,
        Ok(Lookup::NotFound | Lookup::Unconfigured) => {
            return ShareUnavailableTemplate.into_response();
        }
        Err(e) => {
            // Even a real failure renders the empty state on this route
            sentry::capture_error(&e);
            tracing::error!("Failed to resolve share token: {e}");
            return ShareUnavailableTemplate.into_response();
        }
    };

    let items = match repo.items_for_proforma(&proforma).await {
        Ok(items) => items,
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!("Failed to load shared proforma items: {e}");
            return ShareUnavailableTemplate.into_response();
        }
    };

    SharedProformaTemplate {
        notes: proforma.notes.clone().unwrap_or_default(),
        proforma: ProformaView::from(&proforma),
        items: items.iter().map(ProformaItemView::from).collect(),
    }
    .into_response()
}
