//! Access logging for completed requests.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use super::trace::TraceId;

/// Middleware that logs method, path, status, latency and trace id once the
/// handler has completed. Must run inside the trace middleware's scope so
/// the id is available.
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let trace_id = TraceId::current();
    tracing::info!(
        target: "keel_web::access",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms,
        trace_id = trace_id.as_ref().map(TraceId::as_str).unwrap_or("-"),
        "request completed"
    );

    response
}
