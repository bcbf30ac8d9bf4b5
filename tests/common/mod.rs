#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;
use vault_proxy::{
    api::build_router,
    secrets::{InMemoryBackend, KvSecretStore, SecretData, TOKEN_LOOKUP_PATH},
};

pub const PREFIX: &str = "kv";

pub struct TestApp {
    pub backend: Arc<InMemoryBackend>,
    pub store: Arc<KvSecretStore>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.store.clone())
    }
}

/// App over an in-memory backend holding a valid token.
pub async fn setup_test_app() -> TestApp {
    let backend = Arc::new(InMemoryBackend::new());
    let mut token = SecretData::new();
    token.insert("id".to_string(), json!("s.test-token"));
    token.insert("policies".to_string(), json!(["default"]));
    backend.insert(TOKEN_LOOKUP_PATH, token).await;

    app_with(backend)
}

/// App over a backend that rejects every call.
pub fn setup_failing_app() -> TestApp {
    app_with(Arc::new(InMemoryBackend::failing("connection refused")))
}

fn app_with(backend: Arc<InMemoryBackend>) -> TestApp {
    let store = Arc::new(KvSecretStore::new(backend.clone(), PREFIX));
    TestApp { backend, store }
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    app.router().oneshot(builder.body(body).expect("build request")).await.expect("router response")
}

pub async fn send_raw(app: &TestApp, method: Method, path: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("build request");

    app.router().oneshot(request).await.expect("router response")
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

pub async fn read_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.expect("read body").to_vec()
}
