//! JSON API route handlers.
//!
//! API routes answer with structured JSON, including on failure: an absent
//! session is `401 {"error": "Unauthorized"}`, not a redirect.

pub mod notifications;
