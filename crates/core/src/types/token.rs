//! Opaque share tokens for proforma read access.
//!
//! A share token substitutes for session identity: anyone holding the token
//! may read the one proforma it points at. Tokens are 32 bytes of OS
//! randomness, base64url-encoded (43 characters, no padding), which puts
//! guessing well out of reach. `Debug` output is redacted so tokens do not
//! end up in logs or error reports.

use core::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of random bytes in a token.
const TOKEN_BYTES: usize = 32;

/// Errors that can occur when parsing a [`ShareToken`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ShareTokenError {
    /// The input is not exactly the encoded token length.
    #[error("share token must be exactly {expected} characters")]
    WrongLength {
        /// Required encoded length.
        expected: usize,
    },
    /// The input contains characters outside the base64url alphabet.
    #[error("share token contains invalid characters")]
    InvalidCharacters,
}

/// An opaque, unguessable token granting read access to one proforma.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Encoded length: 32 bytes, base64url, no padding.
    pub const ENCODED_LENGTH: usize = 43;

    /// Generate a fresh token from OS randomness.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Parse a token from an untrusted string (e.g. a path segment).
    ///
    /// Shape validation only - whether the token resolves to anything is the
    /// data layer's concern. A malformed token can therefore be rejected
    /// without a database round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has the wrong length or contains
    /// characters outside the base64url alphabet.
    pub fn parse(s: &str) -> Result<Self, ShareTokenError> {
        if s.len() != Self::ENCODED_LENGTH {
            return Err(ShareTokenError::WrongLength {
                expected: Self::ENCODED_LENGTH,
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ShareTokenError::InvalidCharacters);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the token as a string slice for binding into queries and links.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First few characters are enough to correlate log lines
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "ShareToken({prefix}\u{2026})")
    }
}

impl std::str::FromStr for ShareToken {
    type Err = ShareTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ShareToken {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ShareToken {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ShareToken {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_expected_shape() {
        let token = ShareToken::generate();
        assert_eq!(token.as_str().len(), ShareToken::ENCODED_LENGTH);
        assert!(ShareToken::parse(token.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_unique() {
        let a = ShareToken::generate();
        let b = ShareToken::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            ShareToken::parse("short"),
            Err(ShareTokenError::WrongLength { .. })
        ));
        assert!(matches!(
            ShareToken::parse(""),
            Err(ShareTokenError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        let bad = "!".repeat(ShareToken::ENCODED_LENGTH);
        assert!(matches!(
            ShareToken::parse(&bad),
            Err(ShareTokenError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = ShareToken::generate();
        let debug = format!("{token:?}");
        assert!(!debug.contains(token.as_str()));
        assert!(debug.starts_with("ShareToken("));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        let token = ShareToken::generate();
        let parsed: ShareToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
    }
}
