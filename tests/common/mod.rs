use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header::CONTENT_TYPE};
use movieworld::config::Config;
use movieworld::db::Database;
use movieworld::handler::AppState;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over a fresh database. Keep the `TempDir` alive for the test.
pub async fn build_test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("movieworld.db")).await.unwrap();
    let cfg = Config::default();
    let app = movieworld::app(AppState { db: Arc::new(db) }, &cfg);
    (dir, app)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
