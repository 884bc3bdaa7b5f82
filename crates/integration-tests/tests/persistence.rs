//! Session state surviving a restart of the application.

#![allow(clippy::unwrap_used)]

use groovy_core::{Sort, SortOrder};
use groovy_integration_tests::{CAT_TEE, TestContext, size};
use groovy_storefront::checkout;
use groovy_storefront::store::{JsonFileStore, STORE_NAME, StateStore};

#[tokio::test]
async fn test_restart_restores_cart() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.start().await;
        let product = state.catalog().find(CAT_TEE).await.unwrap();
        state.add_product(&product, size("S"), 2).unwrap();
        state.add_product(&product, size("XS"), 1).unwrap();
        state.set_visibility(true);
    }

    let restarted = ctx.start().await;

    assert_eq!(restarted.cart().len(), 2);
    assert_eq!(restarted.cart().total_item_count(), 3);
    assert_eq!(restarted.cart().line(CAT_TEE, &size("S")).unwrap().quantity(), 2);
    assert!(restarted.cart().is_visible());
}

#[tokio::test]
async fn test_restart_restores_filter() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.start().await;
        state.change_sizes(vec![size("XXL")]);
        state.change_sort(vec![Sort::price(SortOrder::Asc)]);
    }

    let restarted = ctx.start().await;

    assert_eq!(restarted.filter().sizes, vec![size("XXL")]);
    assert_eq!(restarted.filter().price_order(), SortOrder::Asc);
    let products = restarted.list_products().await.unwrap();
    assert_eq!(products.len(), 4);
    assert!(products.windows(2).all(|w| w[0].price <= w[1].price));
}

#[tokio::test]
async fn test_confirmed_checkout_is_persisted() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.start().await;
        let product = state.catalog().find(CAT_TEE).await.unwrap();
        state.add_product(&product, size("S"), 1).unwrap();
        checkout::confirm(&mut state).unwrap();
    }

    let restarted = ctx.start().await;
    assert!(restarted.cart().is_empty());
}

#[tokio::test]
async fn test_state_file_is_named_snapshot() {
    let ctx = TestContext::new();
    let mut state = ctx.start().await;
    state.set_visibility(true);

    let raw = std::fs::read_to_string(ctx.state_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["name"], STORE_NAME);

    let snapshot = JsonFileStore::new(ctx.state_path()).load().unwrap().unwrap();
    assert!(snapshot.cart.is_visible());
}

#[tokio::test]
async fn test_corrupt_state_starts_empty() {
    let ctx = TestContext::new();
    std::fs::create_dir_all(ctx.state_path().parent().unwrap()).unwrap();
    std::fs::write(ctx.state_path(), "{ not json").unwrap();

    let mut state = ctx.start().await;
    assert!(state.cart().is_empty());

    // The next change overwrites the unreadable file.
    state.set_visibility(true);
    let restarted = ctx.start().await;
    assert!(restarted.cart().is_visible());
}

#[tokio::test]
async fn test_unsupported_version_starts_empty() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.start().await;
        let product = state.catalog().find(CAT_TEE).await.unwrap();
        state.add_product(&product, size("S"), 1).unwrap();
    }

    let raw = std::fs::read_to_string(ctx.state_path()).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    json["version"] = serde_json::json!(99);
    std::fs::write(ctx.state_path(), json.to_string()).unwrap();

    let restarted = ctx.start().await;
    assert!(restarted.cart().is_empty());
}
