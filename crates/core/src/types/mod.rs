//! Domain types shared across Brasswood crates.

pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod token;

pub use email::{Email, EmailError};
pub use id::{CategoryId, NotificationId, OrderId, OrderItemId, ProductId, ProformaId,
    ProformaItemId, UserId};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use status::{OrderStatus, PaymentStatus, ProformaStatus, StatusParseError, UserRole};
pub use token::{ShareToken, ShareTokenError};
