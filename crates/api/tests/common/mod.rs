#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bson::oid::ObjectId;
use http_body_util::BodyExt;
use tower::ServiceExt;

use menagerie_api::config::ServerConfig;
use menagerie_api::router::build_app_router;
use menagerie_api::state::AppState;
use menagerie_db::Db;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        mongo_uri: String::new(),
        mongo_db: "menagerie_test".to_string(),
    }
}

/// A database handle whose server never answers.
///
/// The driver connects lazily, so requests that are rejected before any
/// store access work normally; anything that reaches the store fails fast.
pub async fn unreachable_db() -> Db {
    menagerie_db::connect(
        "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200",
        "menagerie_test",
    )
    .await
    .expect("parse test URI")
}

/// A fresh, uniquely named database on the server at `MONGO_URI`.
pub async fn live_db() -> Db {
    let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let name = format!("menagerie_api_test_{}", ObjectId::new().to_hex());
    menagerie_db::connect(&uri, &name).await.expect("connect")
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(db: Db) -> Router {
    build_app_router(AppState { db }, &test_config())
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
