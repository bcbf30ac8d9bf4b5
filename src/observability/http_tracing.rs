//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that wraps every request in a span carrying a fresh
//! `request_id` and logs method, path, status and latency when the response
//! is produced. Health probes are not logged.

use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;

use crate::request_span;

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const HEALTH_PATH: &str = "/health";

/// Axum middleware that logs each HTTP request
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    if request.method() == Method::GET && request.uri().path() == HEALTH_PATH {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = uuid::Uuid::new_v4().to_string();
    let start = Instant::now();

    let span = request_span!(method, path, request_id = request_id);
    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    span.in_scope(|| {
        if status >= 500 {
            tracing::warn!(status, elapsed_ms, "Request failed");
        } else {
            tracing::info!(status, elapsed_ms, "Request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
