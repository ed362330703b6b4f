pub mod access_log;
pub mod trace;

use axum::{extract::Request, middleware, Router};

pub use access_log::access_log_middleware;
pub use trace::{trace_id_middleware, TraceConfig, TraceId, TRACE_ID_HEADER};

/// Apply the standard middleware stack (trace id + access log) with the
/// default `X-Request-ID` header.
pub fn apply_standard_middleware(router: Router) -> Router {
    apply_standard_middleware_with(router, TraceConfig::default())
}

/// Apply the standard middleware stack with a custom trace header.
///
/// Layers run LIFO: the trace layer is added last so it wraps the access
/// log, which needs the id in scope when the log line is emitted.
pub fn apply_standard_middleware_with(router: Router, config: TraceConfig) -> Router {
    let header = config.header;
    router
        .layer(middleware::from_fn(access_log_middleware))
        .layer(middleware::from_fn(
            move |request: Request, next: middleware::Next| {
                let header = header.clone();
                async move { trace::run_with_header(header, request, next).await }
            },
        ))
}
