//! Catalog domain types.
//!
//! The catalog is public: no ownership scoping applies, only graceful
//! degradation when the store is absent.

use brasswood_core::{CategoryId, Price, ProductId};

/// A browsable product category.
#[derive(Debug, Clone)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// URL slug (e.g. `oak-shelving`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Optional blurb shown on the category page.
    pub description: Option<String>,
    /// Whether the category is promoted on the home page.
    pub featured: bool,
}

/// A product within a category.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// URL slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Current list price.
    pub price: Price,
    /// Whether the product can currently be quoted/ordered.
    pub available: bool,
}
