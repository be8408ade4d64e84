//! Shared helpers for the integration tests: an application over a fresh
//! in-memory database, plus request/response plumbing.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use employee_records_backend::database::Database;
use employee_records_backend::routes::build_router;
use employee_records_backend::{AppState, Config};

pub fn test_config() -> Config {
    Config {
        db_url: String::from("sqlite::memory:"),
        bind_addr: String::from("127.0.0.1:0"),
        seed_on_startup: false,
    }
}

/// Build application state over a fresh in-memory database. The pool is
/// capped at one connection so every query sees the same memory database.
pub async fn test_state() -> Arc<AppState> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let db = Database::new(pool);
    db.ensure_schema().await.expect("schema");
    Arc::new(AppState {
        db,
        config: test_config(),
    })
}

/// Build the production router over a fresh in-memory database.
pub async fn test_app() -> Router {
    build_router(test_state().await)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

/// Helper: collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
