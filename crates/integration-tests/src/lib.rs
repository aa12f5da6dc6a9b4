//! Shared helpers for Brasswood integration tests.
//!
//! Tests drive a running storefront over HTTP. Configuration comes from the
//! environment (see the crate README); everything here panics loudly when a
//! required variable is missing, since a half-configured run would pass
//! vacuously.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_TEST_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Seeded test account credentials.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub email: String,
    pub password: String,
}

/// The primary seeded account (owns the seeded order and proforma).
#[must_use]
pub fn primary_account() -> TestAccount {
    TestAccount {
        email: required_env("STOREFRONT_TEST_EMAIL"),
        password: required_env("STOREFRONT_TEST_PASSWORD"),
    }
}

/// The secondary seeded account (owns nothing the primary owns).
#[must_use]
pub fn secondary_account() -> TestAccount {
    TestAccount {
        email: required_env("STOREFRONT_TEST_EMAIL_2"),
        password: required_env("STOREFRONT_TEST_PASSWORD_2"),
    }
}

/// Read a required test environment variable.
#[must_use]
pub fn required_env(key: &str) -> String {
    std::env::var(key)
        .unwrap_or_else(|_| panic!("{key} must be set for integration tests (see README)"))
}

/// Create an HTTP client with a cookie store (sessions ride on cookies).
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Sign the client in via the login form.
///
/// A successful login redirects to `/account`; the client follows the
/// redirect, so success is observable from the final URL.
pub async fn sign_in(client: &Client, base_url: &str, account: &TestAccount) {
    let response = client
        .post(format!("{base_url}/auth/login"))
        .form(&[
            ("email", account.email.as_str()),
            ("password", account.password.as_str()),
        ])
        .send()
        .await
        .expect("Failed to submit login form");

    assert!(
        response.url().path().starts_with("/account"),
        "login as {} did not reach /account (landed on {})",
        account.email,
        response.url()
    );
}
