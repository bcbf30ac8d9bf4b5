//! # Observability Infrastructure
//!
//! Structured logging, per-request tracing and the backend health check.

pub mod health;
pub mod http_tracing;
pub mod logging;

pub use health::{check_backend, HealthStatus, ServiceStatus};
pub use http_tracing::trace_http_requests;
pub use logging::{init_logging, log_config_info};
