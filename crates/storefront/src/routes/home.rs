//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::catalog::CatalogRepository;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::catalog::CategoryView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub signed_in: bool,
    pub featured: Vec<CategoryView>,
}

/// Display the home page with featured categories.
///
/// The catalog degrades to an empty list when the store is unconfigured or
/// unreachable; the home page always renders.
#[instrument(skip(state, auth))]
pub async fn home(State(state): State<AppState>, auth: OptionalAuth) -> impl IntoResponse {
    let featured = match CatalogRepository::new(state.db()).featured_categories().await {
        Ok(categories) => categories.iter().map(CategoryView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch featured categories: {e}");
            Vec::new()
        }
    };

    HomeTemplate {
        signed_in: auth.0.is_some(),
        featured,
    }
}
