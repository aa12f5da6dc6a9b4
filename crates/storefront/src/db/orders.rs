//! Order repository.
//!
//! Every single-record query filters by the owning user id server-side; a
//! syntactically valid order id belonging to someone else is
//! indistinguishable from an id that never existed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use brasswood_core::{CurrencyCode, OrderId, OrderItemId, OrderStatus, PaymentStatus, Price, UserId};

use super::{Lookup, RepositoryError};
use crate::models::{Order, OrderItem};

/// Repository for ownership-scoped order lookups.
pub struct OrderRepository<'a> {
    db: Option<&'a PgPool>,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    number: String,
    status: String,
    payment_status: String,
    total_amount: Decimal,
    currency: String,
    placed_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let payment_status = self
            .payment_status
            .parse::<PaymentStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let currency = self
            .currency
            .parse::<CurrencyCode>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            number: self.number,
            status,
            payment_status,
            total: Price::new(self.total_amount, currency),
            placed_at: self.placed_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_name: String,
    quantity: i32,
    unit_amount: Decimal,
    currency: String,
}

impl OrderItemRow {
    fn into_domain(self) -> Result<OrderItem, RepositoryError> {
        let currency = self
            .currency
            .parse::<CurrencyCode>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(OrderItem {
            id: self.id,
            order_id: self.order_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: Price::new(self.unit_amount, currency),
        })
    }
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository over the (possibly absent) store.
    #[must_use]
    pub const fn new(db: Option<&'a PgPool>) -> Self {
        Self { db }
    }

    /// List all orders owned by a user, newest first.
    ///
    /// Returns an empty list when the store is unconfigured.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored status or currency is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, number, status, payment_status, total_amount, currency, placed_at
             FROM orders
             WHERE user_id = $1
             ORDER BY placed_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// Get a single order, scoped to its owner.
    ///
    /// The owner filter is part of the query itself: a valid id owned by a
    /// different user produces `Lookup::NotFound`, never the record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored status or currency is invalid.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Lookup<Order>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, number, status, payment_status, total_amount, currency, placed_at
             FROM orders
             WHERE id = $1 AND user_id = $2",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        row.map(OrderRow::into_domain).transpose().map(Lookup::from)
    }

    /// List the line items of an order.
    ///
    /// Takes the already-fetched `Order` rather than a bare id, so callers
    /// cannot reach items without having passed the ownership check first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored currency is invalid.
    pub async fn items_for_order(&self, order: &Order) -> Result<Vec<OrderItem>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_name, quantity, unit_amount, currency
             FROM order_items
             WHERE order_id = $1
             ORDER BY id ASC",
        )
        .bind(order.id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(OrderItemRow::into_domain).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_degrades_without_error() {
        let repo = OrderRepository::new(None);

        assert!(repo.list_for_user(UserId::new(1)).await.unwrap().is_empty());
        assert!(matches!(
            repo.get_for_user(UserId::new(1), OrderId::new(1))
                .await
                .unwrap(),
            Lookup::Unconfigured
        ));
    }
}
