use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::observability::trace_http_requests;
use crate::secrets::SecretStore;

use super::handlers::{
    delete_secret_handler, health_handler, list_keys_handler, lookup_secret_handler,
    store_secret_handler,
};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn SecretStore>,
}

pub fn build_router(store: Arc<dyn SecretStore>) -> Router {
    let api_state = ApiState { store };

    Router::new()
        .route("/health", get(health_handler))
        .route("/secrets", get(list_keys_handler))
        .route(
            "/secrets/{key}",
            get(lookup_secret_handler).post(store_secret_handler).delete(delete_secret_handler),
        )
        .with_state(api_state)
        .layer(middleware::from_fn(trace_http_requests))
}
