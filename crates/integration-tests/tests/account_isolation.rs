//! Ownership isolation across accounts.
//!
//! These tests require:
//! - A running `PostgreSQL` with migrations applied and test data seeded
//! - The storefront running (cargo run -p brasswood-storefront)
//! - Two seeded accounts, with the seeded order owned by the primary one
//!
//! Run with: cargo test -p brasswood-integration-tests -- --ignored

use reqwest::StatusCode;

use brasswood_integration_tests::{
    client, primary_account, required_env, secondary_account, sign_in, storefront_base_url,
};

#[tokio::test]
#[ignore = "Requires running storefront, PostgreSQL, and seeded test accounts"]
async fn test_owner_sees_their_order_detail() {
    let base_url = storefront_base_url();
    let order_id = required_env("STOREFRONT_TEST_ORDER_ID");

    let owner = client();
    sign_in(&owner, &base_url, &primary_account()).await;

    let response = owner
        .get(format!("{base_url}/account/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to fetch order detail");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read response");
    assert!(body.contains(&required_env("STOREFRONT_TEST_ORDER_NUMBER")));
}

#[tokio::test]
#[ignore = "Requires running storefront, PostgreSQL, and seeded test accounts"]
async fn test_same_order_id_is_not_found_for_another_user() {
    let base_url = storefront_base_url();
    let order_id = required_env("STOREFRONT_TEST_ORDER_ID");

    // A different signed-in user asks for the same, perfectly valid id
    let other = client();
    sign_in(&other, &base_url, &secondary_account()).await;

    let response = other
        .get(format!("{base_url}/account/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to fetch order detail");

    // Not-owned collapses into not-found; never a 403, never the record
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront, PostgreSQL, and seeded test accounts"]
async fn test_order_listing_never_contains_other_users_orders() {
    let base_url = storefront_base_url();
    let foreign_number = required_env("STOREFRONT_TEST_ORDER_NUMBER");

    let other = client();
    sign_in(&other, &base_url, &secondary_account()).await;

    let response = other
        .get(format!("{base_url}/account/orders"))
        .send()
        .await
        .expect("Failed to fetch order history");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read response");
    assert!(
        !body.contains(&foreign_number),
        "secondary account's order history leaked order {foreign_number}"
    );
}

#[tokio::test]
#[ignore = "Requires running storefront, PostgreSQL, and seeded test accounts"]
async fn test_malformed_order_id_is_not_found() {
    let base_url = storefront_base_url();

    let owner = client();
    sign_in(&owner, &base_url, &primary_account()).await;

    let response = owner
        .get(format!("{base_url}/account/orders/not-a-number"))
        .send()
        .await
        .expect("Failed to fetch order detail");

    // Unparseable ids get the same 404 as missing records, not a 400
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
