use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::{self, auth};

pub const TEST_SECRET: &str = "test-secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// App over a fresh migrated database (in-memory SQLite unless
/// `TEST_DATABASE_URL` is set).
pub async fn build_app() -> anyhow::Result<Router> {
    Ok(build_app_with_db().await?.0)
}

/// Same as [`build_app`], also handing back the database for direct checks.
pub async fn build_app_with_db() -> anyhow::Result<(Router, DatabaseConnection)> {
    let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db = models::db::connect_and_migrate(&configs::DatabaseConfig { url, ..Default::default() }).await?;
    let auth_cfg = configs::AuthConfig { jwt_secret: TEST_SECRET.into(), token_ttl_hours: 12, cookie_secure: false };
    let state = auth::ServerState::new(db.clone(), &auth_cfg);
    Ok((routes::build_router(state, cors(), "tests/no-frontend"), db))
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    match body {
        Some(v) => b
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => b.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp: Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

/// Register a fresh user and log in; returns (user_id, token).
pub async fn signed_in_user(app: &Router, name: &str) -> (Uuid, String) {
    let email = format!("{}_{}@example.com", name.to_lowercase(), Uuid::new_v4());
    let password = "S3curePass!";
    let (status, _) = send(app, json_request("POST", "/auth/register", None, Some(json!({"name": name, "email": email, "password": password})))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(app, json_request("POST", "/auth/login", None, Some(json!({"email": email, "password": password})))).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["user_id"].as_str().unwrap().parse().unwrap();
    (id, body["token"].as_str().unwrap().to_string())
}
