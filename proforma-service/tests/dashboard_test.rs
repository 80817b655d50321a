mod common;

use common::TestApp;
use reqwest::StatusCode;

#[tokio::test]
async fn dashboard_summarises_sample_data() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["total_clients"], 1);
    assert_eq!(body["total_vendors"], 1);
    assert_eq!(body["total_items"], 2);
    assert_eq!(body["total_invoices"], 1);
    // The only sample invoice is dated January 2025.
    let this_month = body["invoices_this_month"].as_i64().unwrap();
    assert!((0..=1).contains(&this_month));
    assert_eq!(body["total_revenue"].as_f64(), Some(991_200.0));
    assert_eq!(body["low_stock_items"], 0);
    assert_eq!(body["recent_invoices"].as_array().unwrap().len(), 1);
}
