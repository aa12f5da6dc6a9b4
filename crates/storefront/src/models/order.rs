//! Order domain types.

use chrono::{DateTime, Utc};

use brasswood_core::{OrderId, OrderItemId, OrderStatus, PaymentStatus, Price, UserId};

/// A confirmed customer order.
///
/// Invariant: an `Order` is only ever handed to the user identified by
/// `user_id` - the repository enforces this in every query.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Human-facing order number (e.g. `SO-1042`).
    pub number: String,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Order total.
    pub total: Price,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// A line item on an order.
///
/// Product name and unit price are snapshots taken at order time; later
/// catalog edits do not rewrite history.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Unique line-item ID.
    pub id: OrderItemId,
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Product name at order time.
    pub product_name: String,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price at order time.
    pub unit_price: Price,
}
