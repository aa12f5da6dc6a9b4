//! Hosted identity provider client.
//!
//! Accounts live in a managed auth service; the storefront never stores
//! credentials itself. This client performs the password grant against the
//! provider's token endpoint and hands back the provider subject, which the
//! login flow maps onto the local `users` mirror row.
//!
//! Every provider call goes through the outbound timeout guard.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use brasswood_core::Email;

use super::outbound::{DEFAULT_TIMEOUT, OutboundError, send_with_timeout};
use crate::config::IdentityConfig;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider did not answer (timeout or transport failure).
    ///
    /// The wrapped error keeps timeouts distinguishable from other
    /// transport failures for logging; the user-facing treatment is the
    /// same "try again shortly" either way.
    #[error("identity provider unavailable: {0}")]
    Unavailable(#[from] OutboundError),

    /// The provider answered with an unexpected status.
    #[error("identity provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    /// The provider's response could not be interpreted.
    #[error("identity response parse error: {0}")]
    Parse(String),
}

/// A verified identity as reported by the provider.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// Provider-side subject (stable account id).
    pub subject: String,
    /// Email the provider holds for the account.
    pub email: Email,
}

/// Client for the hosted identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    token_url: String,
}

/// Password-grant request body.
#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// Subset of the provider's token response we care about.
#[derive(Deserialize)]
struct TokenResponse {
    user: ProviderUser,
}

#[derive(Deserialize)]
struct ProviderUser {
    id: String,
    email: String,
}

impl IdentityClient {
    /// Create a new identity provider client.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Parse` if the anonymous key contains bytes
    /// that cannot appear in an HTTP header.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let mut headers = HeaderMap::new();

        let mut anon_key = HeaderValue::from_str(config.anon_key.expose_secret())
            .map_err(|e| IdentityError::Parse(format!("invalid anon key format: {e}")))?;
        anon_key.set_sensitive(true);
        headers.insert("apikey", anon_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token_url: format!("{}/token?grant_type=password", config.public_url),
        })
    }

    /// Verify an email/password pair with the provider.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the provider rejects the pair,
    /// `Unavailable` when it does not answer in time, `Provider` for other
    /// non-success statuses, and `Parse` for an uninterpretable response.
    pub async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderIdentity, IdentityError> {
        let request = self
            .client
            .post(&self.token_url)
            .json(&PasswordGrant { email, password });

        let response = send_with_timeout(request, DEFAULT_TIMEOUT).await?;
        let status = response.status();

        // The provider answers 400/401 for a wrong pair depending on version
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidCredentials);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;

        let email = Email::parse(&token.user.email)
            .map_err(|e| IdentityError::Parse(format!("provider returned bad email: {e}")))?;

        Ok(ProviderIdentity {
            subject: token.user.id,
            email,
        })
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(OutboundError::Http(err))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn test_client() -> IdentityClient {
        IdentityClient::new(&IdentityConfig {
            public_url: "https://auth.example.test".to_string(),
            anon_key: SecretString::from("anon-key-value"),
        })
        .unwrap()
    }

    #[test]
    fn test_token_url_shape() {
        let client = test_client();
        assert_eq!(
            client.token_url,
            "https://auth.example.test/token?grant_type=password"
        );
    }

    #[test]
    fn test_rejects_unprintable_anon_key() {
        let result = IdentityClient::new(&IdentityConfig {
            public_url: "https://auth.example.test".to_string(),
            anon_key: SecretString::from("bad\nkey"),
        });
        assert!(matches!(result, Err(IdentityError::Parse(_))));
    }
}
