//! End-to-end API tests driving the real router over an isolated work dir

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use shipdesk::{Config, ServerState, api};

fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().display().to_string(),
        http_port: 0,
        static_dir: dir.path().join("dist").display().to_string(),
        environment: "test".into(),
    };
    let state = ServerState::initialize(&config).unwrap();
    (dir, api::build_app(&state))
}

fn full_order() -> Value {
    json!({
        "Customer_Name": "Ali",
        "Mobile_No": "0100",
        "Description": "d",
        "Street": "s",
        "City": "CAIRO",
        "Alternative_Contact": "0199",
        "totalWeight": 1500
    })
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn add_order_rejects_missing_fields() {
    let (_dir, app) = test_app();

    let (status, body) = post_json(&app, "/api/add-order", json!({ "Mobile_No": "0100" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Customer_Name"));
    assert!(error.contains("totalWeight"));
    assert!(!error.contains("Mobile_No"));
}

#[tokio::test]
async fn add_order_returns_the_created_record() {
    let (_dir, app) = test_app();

    let (status, body) = post_json(&app, "/api/add-order", full_order()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order added successfully");
    let order = &body["order"];
    assert!(order["Package_Serial"].as_str().unwrap().starts_with("ORD"));
    assert_eq!(order["Customer_Name"], "Ali");
    // Default special notes embed the alternate contact
    assert!(order["Item_Special_Notes"].as_str().unwrap().contains("0199"));
    // Reserved downstream fields stay empty
    assert_eq!(order["Merchant_Name"], "");
}

#[tokio::test]
async fn orders_endpoint_reports_queue_contents() {
    let (_dir, app) = test_app();

    let (_, body) = get_json(&app, "/orders").await;
    assert_eq!(body["count"], 0);

    post_json(&app, "/api/add-order", full_order()).await;
    post_json(&app, "/api/add-order", full_order()).await;

    let (status, body) = get_json(&app, "/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn download_is_404_on_empty_queue_and_numbers_files_sequentially() {
    let (_dir, app) = test_app();

    let (status, body) = get_json(&app, "/api/download").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No orders to download");

    post_json(&app, "/api/add-order", full_order()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Orders_1.xlsx"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // xlsx artifacts are ZIP containers
    assert_eq!(&bytes[..4], b"PK\x03\x04");

    // The failed empty download consumed no number; this one did
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("Orders_2.xlsx"));
}

#[tokio::test]
async fn reset_clears_the_queue_but_stats_keep_counting() {
    let (_dir, app) = test_app();

    post_json(&app, "/api/add-order", full_order()).await;
    let (_, body) = get_json(&app, "/orders").await;
    assert_eq!(body["count"], 1);

    let (status, body) = post_json(&app, "/api/reset-orders", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Orders have been reset.");

    let (_, body) = get_json(&app, "/orders").await;
    assert_eq!(body["count"], 0);

    let (status, stats) = get_json(&app, "/api/order-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalCount"], 1);
    assert_eq!(stats["dailyCount"], 1);
}

#[tokio::test]
async fn stats_start_at_zero() {
    let (_dir, app) = test_app();

    let (status, stats) = get_json(&app, "/api/order-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["dailyCount"], 0);
    assert_eq!(stats["monthlyCount"], 0);
    assert_eq!(stats["yearlyCount"], 0);
    assert_eq!(stats["totalCount"], 0);
}

#[tokio::test]
async fn health_reports_status_and_queue_depth() {
    let (_dir, app) = test_app();

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["pending_orders"], 0);
}
