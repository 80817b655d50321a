mod common;

use common::{TestApp, SAMPLE_ITEM_IDS, SAMPLE_VENDOR_ID};
use reqwest::StatusCode;

#[tokio::test]
async fn list_items_includes_stock_summary() {
    let app = TestApp::spawn().await;

    let body: serde_json::Value = app.get("/api/items").await.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Toner - 106A");
    assert_eq!(items[0]["vendor_name"], "Tech Supplies Ltd");
    assert_eq!(body["low_stock_count"], 0);
    // 50 x 120,000 + 30 x 250,000
    assert_eq!(body["inventory_value"].as_f64(), Some(13_500_000.0));
}

#[tokio::test]
async fn filters_do_not_change_the_summary() {
    let app = TestApp::spawn().await;

    let body: serde_json::Value = app.get("/api/items?q=151a").await.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sku"], "TON-151A-001");
    assert_eq!(body["inventory_value"].as_f64(), Some(13_500_000.0));

    let body: serde_json::Value = app
        .get("/api/items?category=Electronics")
        .await
        .json()
        .await
        .unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["categories"], serde_json::json!(["Office Supplies"]));

    let body: serde_json::Value = app.get("/api/items?category=all").await.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_item_applies_defaults_and_resolves_vendor() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/items",
            &serde_json::json!({
                "name": "A4 Paper Ream",
                "sku": "PAP-A4-500",
                "category": "Office Supplies",
                "price": 12000,
                "cost": 9000.5,
                "stock_quantity": 4,
                "vendor_id": SAMPLE_VENDOR_ID
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let item = &body["item"];
    assert_eq!(item["unit"], "pcs");
    assert_eq!(item["min_stock_level"], 10);
    assert_eq!(item["vendor_name"], "Tech Supplies Ltd");
    assert_eq!(item["cost"].as_f64(), Some(9000.5));
}

#[tokio::test]
async fn create_item_rejects_negative_amounts() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/items",
            &serde_json::json!({
                "name": "Broken",
                "sku": "BRK-1",
                "category": "Office Supplies",
                "price": -1,
                "cost": 0,
                "stock_quantity": -5
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_item_rejects_amounts_beyond_storage() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/items",
            &serde_json::json!({
                "name": "Gold Toner",
                "sku": "GLD-1",
                "category": "Office Supplies",
                "price": 1e20,
                "cost": 1000
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"].to_string().contains("price"));
}

#[tokio::test]
async fn delete_item() {
    let app = TestApp::spawn().await;

    let response = app.delete(&format!("/api/items/{}", SAMPLE_ITEM_IDS[1])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .delete(&format!("/api/items/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
