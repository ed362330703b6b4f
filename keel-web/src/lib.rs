//! # Keel Web Utilities
//!
//! Reusable web middleware and utilities for building HTTP APIs with Axum.
//! This crate standardizes the `{code, message, data}` response envelope,
//! maps classified errors to HTTP responses, propagates a per-request trace
//! id, and extracts validated pagination parameters.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use keel_web::{
//!     extractors::Page,
//!     middleware::apply_standard_middleware,
//!     ok, ApiError, ApiResult,
//! };
//!
//! async fn get_item(Page(params): Page) -> ApiResult<Vec<String>> {
//!     if params.page > 1 {
//!         return Err(ApiError::not_found("no more items"));
//!     }
//!     ok(vec!["first".to_string()])
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = apply_standard_middleware(
//!     Router::new().route("/items", get(get_item)),
//! );
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod response;

// Re-export commonly used types and functions
pub use errors::{ApiError, BusinessKind};
pub use extractors::{Page, ValidJson};
pub use keel_api_types::{Envelope, FieldError, LocSegment, PagedResponse, PageParams};
pub use middleware::{
    access_log_middleware, apply_standard_middleware, apply_standard_middleware_with,
    trace_id_middleware, TraceConfig, TraceId, TRACE_ID_HEADER,
};
pub use response::{created, ok, ApiResponse, ApiResult};
