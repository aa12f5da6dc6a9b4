//! Catalog route handlers (category browsing).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Category, Product};
use crate::state::AppState;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub slug: String,
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
        }
    }
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub categories: Vec<CategoryView>,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/show.html")]
pub struct CatalogShowTemplate {
    pub category: CategoryView,
    pub products: Vec<ProductView>,
}

/// Display the category listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = CatalogRepository::new(state.db()).list_categories().await?;

    Ok(CatalogIndexTemplate {
        categories: categories.iter().map(CategoryView::from).collect(),
    })
}

/// Display a category with its products.
///
/// Unknown slugs are a plain 404; an unconfigured store means every slug is
/// unknown, which collapses to the same outcome.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.db());

    let category = repo
        .get_category_by_slug(&slug)
        .await?
        .into_option()
        .ok_or_else(|| AppError::NotFound(format!("category {slug}")))?;

    let products = repo.products_in_category(&category).await?;

    Ok(CatalogShowTemplate {
        category: CategoryView::from(&category),
        products: products.iter().map(ProductView::from).collect(),
    })
}
