//! Proforma repository.
//!
//! Two access paths exist: ownership-scoped (session identity, like orders)
//! and token-scoped (`get_by_token`), which deliberately requires no
//! identity. The token path collapses "unknown token", "expired token", and
//! "someone else's token" into one `NotFound` so a caller probing tokens
//! learns nothing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use brasswood_core::{
    CurrencyCode, Price, ProformaId, ProformaItemId, ProformaStatus, ShareToken, UserId,
};

use super::{Lookup, RepositoryError};
use crate::models::{Proforma, ProformaItem};

/// Repository for proforma lookups.
pub struct ProformaRepository<'a> {
    db: Option<&'a PgPool>,
}

const PROFORMA_COLUMNS: &str = "id, user_id, number, status, share_token, \
     share_token_expires_at, total_amount, currency, notes, issued_at";

#[derive(sqlx::FromRow)]
struct ProformaRow {
    id: ProformaId,
    user_id: UserId,
    number: String,
    status: String,
    share_token: ShareToken,
    share_token_expires_at: Option<DateTime<Utc>>,
    total_amount: Decimal,
    currency: String,
    notes: Option<String>,
    issued_at: DateTime<Utc>,
}

impl ProformaRow {
    fn into_domain(self) -> Result<Proforma, RepositoryError> {
        let status = self
            .status
            .parse::<ProformaStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let currency = self
            .currency
            .parse::<CurrencyCode>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Proforma {
            id: self.id,
            user_id: self.user_id,
            number: self.number,
            status,
            share_token: self.share_token,
            share_token_expires_at: self.share_token_expires_at,
            total: Price::new(self.total_amount, currency),
            notes: self.notes,
            issued_at: self.issued_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProformaItemRow {
    id: ProformaItemId,
    proforma_id: ProformaId,
    product_name: String,
    quantity: i32,
    unit_amount: Decimal,
    currency: String,
}

impl ProformaItemRow {
    fn into_domain(self) -> Result<ProformaItem, RepositoryError> {
        let currency = self
            .currency
            .parse::<CurrencyCode>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(ProformaItem {
            id: self.id,
            proforma_id: self.proforma_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: Price::new(self.unit_amount, currency),
        })
    }
}

impl<'a> ProformaRepository<'a> {
    /// Create a new proforma repository over the (possibly absent) store.
    #[must_use]
    pub const fn new(db: Option<&'a PgPool>) -> Self {
        Self { db }
    }

    /// List all proformas owned by a user, newest first.
    ///
    /// Returns an empty list when the store is unconfigured.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored status or currency is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Proforma>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, ProformaRow>(&format!(
            "SELECT {PROFORMA_COLUMNS} FROM proformas
             WHERE user_id = $1
             ORDER BY issued_at DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(ProformaRow::into_domain).collect()
    }

    /// Get a single proforma, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored status or currency is invalid.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        proforma_id: ProformaId,
    ) -> Result<Lookup<Proforma>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let row = sqlx::query_as::<_, ProformaRow>(&format!(
            "SELECT {PROFORMA_COLUMNS} FROM proformas
             WHERE id = $1 AND user_id = $2"
        ))
        .bind(proforma_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        row.map(ProformaRow::into_domain)
            .transpose()
            .map(Lookup::from)
    }

    /// Get a proforma by share token alone - no identity required.
    ///
    /// The expiry check happens in the query; an expired token and a token
    /// that never existed produce the same `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored status or currency is invalid.
    pub async fn get_by_token(
        &self,
        token: &ShareToken,
    ) -> Result<Lookup<Proforma>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Lookup::Unconfigured);
        };

        let row = sqlx::query_as::<_, ProformaRow>(&format!(
            "SELECT {PROFORMA_COLUMNS} FROM proformas
             WHERE share_token = $1
               AND (share_token_expires_at IS NULL OR share_token_expires_at > now())"
        ))
        .bind(token.as_str())
        .fetch_optional(pool)
        .await?;

        row.map(ProformaRow::into_domain)
            .transpose()
            .map(Lookup::from)
    }

    /// List the line items of a proforma.
    ///
    /// Takes the already-fetched `Proforma` so both access paths (owner and
    /// token) pass through their respective authorization first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored currency is invalid.
    pub async fn items_for_proforma(
        &self,
        proforma: &Proforma,
    ) -> Result<Vec<ProformaItem>, RepositoryError> {
        let Some(pool) = self.db else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, ProformaItemRow>(
            "SELECT id, proforma_id, product_name, quantity, unit_amount, currency
             FROM proforma_items
             WHERE proforma_id = $1
             ORDER BY id ASC",
        )
        .bind(proforma.id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(ProformaItemRow::into_domain).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_degrades_without_error() {
        let repo = ProformaRepository::new(None);

        assert!(repo.list_for_user(UserId::new(1)).await.unwrap().is_empty());
        assert!(matches!(
            repo.get_by_token(&ShareToken::generate()).await.unwrap(),
            Lookup::Unconfigured
        ));
        assert!(matches!(
            repo.get_for_user(UserId::new(1), ProformaId::new(1))
                .await
                .unwrap(),
            Lookup::Unconfigured
        ));
    }
}
