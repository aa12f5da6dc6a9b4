//! Catalog repository.
//!
//! The catalog is public - no ownership scoping - but it degrades the same
//! way as everything else when the store is absent: empty listings, never
//! an error.

use rust_decimal::Decimal;
use sqlx::PgPool;

use brasswood_core::{CategoryId, CurrencyCode, Price, ProductId};

use super::{Lookup, RepositoryError};
use crate::models::{Category, Product};

/// Repository for public catalog reads.
pub struct CatalogRepository<'a> {
    db: Option<&'a PgPool>,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    slug: String,
    name: String,
    description: Option<String>,
    featured: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            description: row.description,
            featured: row.featured,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    category_id: CategoryId,
    slug: String,
    name: String,
    description: Option<String>,
    price_amount: Decimal,
    currency: String,
    available: bool,
}

impl ProductRow {
    fn into_domain(self) -> Result<Product, RepositoryError> {
        let currency = self
            .currency
            .parse::<CurrencyCode>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Product {
            id: self.id,
            category_id: self.category_id,
            slug: self.slug,
            name: self.name,
            description: self.description,
            price: Price::new(self.price_amount, currency),
            available: self.available,
        })
    }
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository over the (possibly absent) store.
    #[must_use]
    pub const fn new(db: Option<&'a PgPool>) -> Self {
        Self { db }
    }

    /// List all categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, slug, name, description, featured
             FROM categories
             ORDER BY position ASC, name ASC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// List the categories promoted on the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, slug, name, description, featured
             FROM categories
             WHERE featured
             ORDER BY position ASC, name ASC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Get a category by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Lookup<Category>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, slug, name, description, featured
             FROM categories
             WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Category::from).into())
    }

    /// List the available products of a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored currency is invalid.
    pub async fn products_in_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Product>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, category_id, slug, name, description, price_amount, currency, available
             FROM products
             WHERE category_id = $1 AND available
             ORDER BY name ASC",
        )
        .bind(category.id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(ProductRow::into_domain).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_degrades_without_error() {
        let repo = CatalogRepository::new(None);

        assert!(repo.list_categories().await.unwrap().is_empty());
        assert!(repo.featured_categories().await.unwrap().is_empty());
        assert!(matches!(
            repo.get_category_by_slug("oak-shelving").await.unwrap(),
            Lookup::Unconfigured
        ));
    }
}
