//! Status enums for orders, proformas, and users.
//!
//! Statuses are stored as TEXT columns and parsed on read, so every enum here
//! carries matching `Display`/`FromStr` implementations. An unknown stored
//! value is a parse error the data layer reports as corruption, never a panic.

use serde::{Deserialize, Serialize};

/// Error parsing a status value read from storage.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid {kind} value: {value}")]
pub struct StatusParseError {
    /// Which status enum rejected the value.
    pub kind: &'static str,
    /// The offending stored value.
    pub value: String,
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The stored TEXT representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(StatusParseError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

text_enum!(
    /// Fulfillment lifecycle of a confirmed order.
    OrderStatus, "order status", {
        Confirmed => "confirmed",
        WithSupplier => "with_supplier",
        Dispatched => "dispatched",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
);

impl OrderStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::WithSupplier => "With supplier",
            Self::Dispatched => "Dispatched",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

text_enum!(
    /// Payment state of an order.
    PaymentStatus, "payment status", {
        Pending => "pending",
        DepositPaid => "deposit_paid",
        Paid => "paid",
        Failed => "failed",
    }
);

impl PaymentStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Payment pending",
            Self::DepositPaid => "Deposit paid",
            Self::Paid => "Paid",
            Self::Failed => "Payment failed",
        }
    }
}

text_enum!(
    /// Lifecycle of a proforma quote.
    ProformaStatus, "proforma status", {
        Draft => "draft",
        Pending => "pending",
        Approved => "approved",
        Declined => "declined",
        Expired => "expired",
        Converted => "converted",
    }
);

impl ProformaStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Awaiting approval",
            Self::Approved => "Approved",
            Self::Declined => "Declined",
            Self::Expired => "Expired",
            Self::Converted => "Converted to order",
        }
    }
}

text_enum!(
    /// Account role. The storefront itself only serves customers; the role is
    /// carried so downstream tooling can distinguish staff accounts.
    UserRole, "user role", {
        Customer => "customer",
        Admin => "admin",
    }
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::WithSupplier,
            OrderStatus::Dispatched,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_payment_status_roundtrip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::DepositPaid,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
        ] {
            let parsed: PaymentStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_proforma_status_roundtrip() {
        for status in [
            ProformaStatus::Draft,
            ProformaStatus::Pending,
            ProformaStatus::Approved,
            ProformaStatus::Declined,
            ProformaStatus::Expired,
            ProformaStatus::Converted,
        ] {
            let parsed: ProformaStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_value_is_error() {
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.kind, "order status");
        assert_eq!(err.value, "shipped");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::DepositPaid).unwrap();
        assert_eq!(json, "\"deposit_paid\"");
    }
}
