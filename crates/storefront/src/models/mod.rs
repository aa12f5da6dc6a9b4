//! Domain types for the storefront.
//!
//! These are validated domain objects, separate from database row types;
//! repositories convert rows into them and report bad stored data as
//! corruption instead of letting it leak into handlers.

pub mod catalog;
pub mod notification;
pub mod order;
pub mod proforma;
pub mod session;
pub mod user;

pub use catalog::{Category, Product};
pub use notification::Notification;
pub use order::{Order, OrderItem};
pub use proforma::{Proforma, ProformaItem};
pub use session::{CurrentUser, session_keys};
pub use user::User;
