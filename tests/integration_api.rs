//! API Integration Tests
//!
//! Drives the real router over the in-memory store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = common::app(common::seeded_store());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_orders() {
    let app = common::app(common::seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["email"], "a@x.com");
    assert_eq!(orders[0]["productName"], "Vanilla, Choco");
    assert_eq!(orders[0]["totalOrders"], 2);
    // Unregistered customers keep their row, with null customer fields.
    assert_eq!(orders[1]["email"], "ghost@x.com");
    assert!(orders[1]["name"].is_null());
}

#[tokio::test]
async fn test_get_aggregate_detail() {
    let app = common::app(common::seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/aggregate?email=a@x.com&date=2024-01-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["address"], "Guntur, AP");
    assert_eq!(body["totalOrders"], 2);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["products"][0]["productName"], "Vanilla");
}

#[tokio::test]
async fn test_get_aggregate_not_found() {
    let app = common::app(common::seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/aggregate?email=a@x.com&date=2030-01-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "order_not_found");
}

#[tokio::test]
async fn test_finalize_end_to_end() {
    let store = common::seeded_store();
    let app = common::app(store.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/invoices")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"email": "a@x.com", "date": "2024-01-01"}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let invoice_number = body["invoiceNumber"].as_u64().unwrap();
    assert!((100_000..=999_999).contains(&invoice_number));
    assert_eq!(body["retiredSubmissions"], 2);

    // The finalized key is gone from the detail view.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders/aggregate?email=a@x.com&date=2024-01-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The invoice is retrievable by its number.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/invoices/{invoice_number}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["invoiceTo"], "Ann");
    assert_eq!(body["customerAddress"], "Guntur, AP");
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["item"], "Vanilla");
}

#[tokio::test]
async fn test_finalize_unknown_key_is_404() {
    let app = common::app(common::seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/invoices")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"email": "nobody@x.com", "date": "2024-01-01"}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_invoice_not_found() {
    let app = common::app(common::seeded_store());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/invoices/999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "invoice_not_found");
}

#[tokio::test]
async fn test_unreadable_collection_maps_to_service_unavailable() {
    let store = common::seeded_store();
    store.fail_order_reads();
    let app = common::app(store);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "data_unavailable");
}
