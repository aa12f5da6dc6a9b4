//! External service clients.

pub mod identity;
pub mod outbound;

pub use identity::{IdentityClient, IdentityError};
pub use outbound::{OutboundError, send_with_timeout};
