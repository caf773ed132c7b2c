use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

mod support;
use support::{build_app, json_request, send, signed_in_user};

async fn catalog(app: &axum::Router, token: &str) -> Vec<Value> {
    let (status, body) = send(app, json_request("GET", "/api/services", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}

#[tokio::test]
async fn test_catalog_listing_and_lookup() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, token) = signed_in_user(&app, "Browser").await;
    let services = catalog(&app, &token).await;
    assert_eq!(services.len(), migration::DEFAULT_CATALOG.len());

    let id = services[0]["id"].as_str().unwrap();
    let (status, one) = send(&app, json_request("GET", &format!("/api/services/{id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one, services[0]);

    let (status, _) = send(&app, json_request("GET", &format!("/api/services/{}", Uuid::new_v4()), Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_order_lifecycle() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, token) = signed_in_user(&app, "Buyer").await;
    let services = catalog(&app, &token).await;

    let (status, history) = send(&app, json_request("GET", "/api/orders", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["orders"].as_array().unwrap().len(), 0);
    assert_eq!(history["total_spent_cents"], 0);
    assert_eq!(history["total_spent"], "0.00");

    let (status, placed) = send(&app, json_request("POST", "/api/orders", Some(&token), Some(json!({"service_id": services[0]["id"], "extra_info": "back gate"})))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["extra_info"], "back gate");
    assert_eq!(placed["service_name"], services[0]["name"]);
    let (status, plain) = send(&app, json_request("POST", "/api/orders", Some(&token), Some(json!({"service_id": services[1]["id"]})))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(plain["extra_info"].is_null());

    let (_, history) = send(&app, json_request("GET", "/api/orders", Some(&token), None)).await;
    assert_eq!(history["orders"].as_array().unwrap().len(), 2);
    let expected = services[0]["price_cents"].as_i64().unwrap() + services[1]["price_cents"].as_i64().unwrap();
    assert_eq!(history["total_spent_cents"], expected);

    // note on an order that had none
    let plain_id = plain["order_id"].as_str().unwrap();
    let (status, updated) = send(&app, json_request("PUT", &format!("/api/orders/{plain_id}"), Some(&token), Some(json!({"extra_info": "call first"})))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["extra_info"], "call first");
    let (_, read) = send(&app, json_request("GET", &format!("/api/orders/{plain_id}"), Some(&token), None)).await;
    assert_eq!(read["extra_info"], "call first");

    let placed_id = placed["order_id"].as_str().unwrap();
    let (status, _) = send(&app, json_request("DELETE", &format!("/api/orders/{placed_id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, json_request("DELETE", &format!("/api/orders/{placed_id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, history) = send(&app, json_request("GET", "/api/orders", Some(&token), None)).await;
    assert_eq!(history["orders"].as_array().unwrap().len(), 1);
    assert_eq!(history["total_spent_cents"], services[1]["price_cents"]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_service_and_bad_note() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, token) = signed_in_user(&app, "Picky").await;
    let (status, body) = send(&app, json_request("POST", "/api/orders", Some(&token), Some(json!({"service_id": Uuid::new_v4()})))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let services = catalog(&app, &token).await;
    let huge = "x".repeat(service::orders::domain::MAX_NOTE_LEN + 1);
    let (status, _) = send(&app, json_request("POST", "/api/orders", Some(&token), Some(json!({"service_id": services[0]["id"], "extra_info": huge})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_orders_are_private() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, owner) = signed_in_user(&app, "Owner").await;
    let (_, other) = signed_in_user(&app, "Other").await;
    let services = catalog(&app, &owner).await;

    let (_, placed) = send(&app, json_request("POST", "/api/orders", Some(&owner), Some(json!({"service_id": services[0]["id"], "extra_info": "private"})))).await;
    let id = placed["order_id"].as_str().unwrap();
    let uri = format!("/api/orders/{id}");

    let (status, _) = send(&app, json_request("GET", &uri, Some(&other), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, json_request("PUT", &uri, Some(&other), Some(json!({"extra_info": "mine now"})))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&other), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, others_history) = send(&app, json_request("GET", "/api/orders", Some(&other), None)).await;
    assert_eq!(others_history["total_spent_cents"], 0);

    let (_, still) = send(&app, json_request("GET", &uri, Some(&owner), None)).await;
    assert_eq!(still["extra_info"], "private");
    Ok(())
}
