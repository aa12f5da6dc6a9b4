//! Notification API contract: auth gating and idempotence.
//!
//! Run with: cargo test -p brasswood-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use brasswood_integration_tests::{client, primary_account, sign_in, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_mark_all_read_without_session_is_unauthorized() {
    let base_url = storefront_base_url();

    // Fresh client, no session cookie
    let response = client()
        .post(format!("{base_url}/api/notifications/mark-all-read"))
        .send()
        .await
        .expect("Failed to call mark-all-read");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
#[ignore = "Requires running storefront, PostgreSQL, and seeded test accounts"]
async fn test_mark_all_read_is_idempotent() {
    let base_url = storefront_base_url();

    let owner = client();
    sign_in(&owner, &base_url, &primary_account()).await;

    // First call drains the unread set
    let first = owner
        .post(format!("{base_url}/api/notifications/mark-all-read"))
        .send()
        .await
        .expect("Failed to call mark-all-read");
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = first.json().await.expect("Failed to parse JSON");
    assert_eq!(body["ok"], true);

    let unread_after_first = unread_banner(&owner, &base_url).await;
    assert!(unread_after_first.contains("0 unread"));

    // Second call must succeed and change nothing
    let second = owner
        .post(format!("{base_url}/api/notifications/mark-all-read"))
        .send()
        .await
        .expect("Failed to call mark-all-read");
    assert_eq!(second.status(), StatusCode::OK);

    let unread_after_second = unread_banner(&owner, &base_url).await;
    assert_eq!(unread_after_first, unread_after_second);
}

/// Fetch the notifications page and return its body for unread inspection.
async fn unread_banner(client: &reqwest::Client, base_url: &str) -> String {
    let response = client
        .get(format!("{base_url}/account/notifications"))
        .send()
        .await
        .expect("Failed to fetch notifications page");
    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.expect("Failed to read response")
}
