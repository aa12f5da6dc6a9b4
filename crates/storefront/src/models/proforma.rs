//! Proforma (quote) domain types.

use chrono::{DateTime, Utc};

use brasswood_core::{Price, ProformaId, ProformaItemId, ProformaStatus, ShareToken, UserId};

/// A proforma: a preliminary, amendable quote awaiting approval before
/// conversion to a firm order.
///
/// Owned by one user, but additionally readable by anyone holding the share
/// token (the one deliberate exception to ownership scoping).
#[derive(Debug, Clone)]
pub struct Proforma {
    /// Unique proforma ID.
    pub id: ProformaId,
    /// Owning user.
    pub user_id: UserId,
    /// Human-facing reference (e.g. `PF-2086`).
    pub number: String,
    /// Quote lifecycle status.
    pub status: ProformaStatus,
    /// Opaque token granting read access without a session.
    pub share_token: ShareToken,
    /// When token-based access stops working; `None` means no expiry.
    pub share_token_expires_at: Option<DateTime<Utc>>,
    /// Quoted total.
    pub total: Price,
    /// Free-form notes shown to the customer.
    pub notes: Option<String>,
    /// When the proforma was issued.
    pub issued_at: DateTime<Utc>,
}

/// A line item on a proforma.
#[derive(Debug, Clone)]
pub struct ProformaItem {
    /// Unique line-item ID.
    pub id: ProformaItemId,
    /// Proforma this line belongs to.
    pub proforma_id: ProformaId,
    /// Quoted product name.
    pub product_name: String,
    /// Quantity quoted.
    pub quantity: i32,
    /// Quoted unit price.
    pub unit_price: Price,
}
