//! Per-request trace id propagation.
//!
//! The id is read from a configurable inbound header (blank or non-UUID
//! values are replaced with a freshly generated id), published to a
//! task-local slot for the lifetime of the request, and echoed on the
//! response. The task-local scope gives each in-flight request
//! its own binding, so concurrent requests on one runtime never observe each
//! other's id.

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Default trace id header name
pub const TRACE_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static CURRENT_TRACE_ID: TraceId;
}

/// The per-request correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    /// Generate a fresh random id. Never fails.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an inbound header value. Values that are blank or do not parse
    /// as a UUID are treated as absent, so malformed caller ids are replaced
    /// rather than propagated.
    pub fn from_header_value(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Uuid::try_parse(trimmed).ok()?;
        Some(Self(trimmed.to_string()))
    }

    /// The id bound to the current task's request scope, if any.
    pub fn current() -> Option<Self> {
        CURRENT_TRACE_ID.try_with(Clone::clone).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axum extractor for the trace id of the current request.
impl<S> FromRequestParts<S> for TraceId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<TraceId>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Trace middleware configuration.
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Header consulted inbound and set outbound
    pub header: HeaderName,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(TRACE_ID_HEADER),
        }
    }
}

/// Middleware that assigns a trace id to each request using the default
/// `X-Request-ID` header.
pub async fn trace_id_middleware(request: Request, next: Next) -> Response {
    run_with_header(HeaderName::from_static(TRACE_ID_HEADER), request, next).await
}

pub(crate) async fn run_with_header(
    header: HeaderName,
    mut request: Request,
    next: Next,
) -> Response {
    let trace_id = request
        .headers()
        .get(&header)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_header_value)
        .unwrap_or_default();

    // Handlers can extract the id; logging calls read the task-local slot.
    request.extensions_mut().insert(trace_id.clone());

    let span = tracing::info_span!(
        "request",
        trace_id = %trace_id,
        method = %request.method(),
        uri = %request.uri(),
    );

    let scoped = CURRENT_TRACE_ID.scope(trace_id.clone(), async move { next.run(request).await });
    let mut response = scoped.instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(trace_id.as_str()) {
        response.headers_mut().insert(header, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_header_values_are_treated_as_absent() {
        assert_eq!(TraceId::from_header_value(""), None);
        assert_eq!(TraceId::from_header_value("   "), None);
    }

    #[test]
    fn non_uuid_header_values_are_treated_as_absent() {
        assert_eq!(TraceId::from_header_value("short-id"), None);
        assert_eq!(TraceId::from_header_value("abc-123"), None);
        assert_eq!(
            TraceId::from_header_value("not-a-uuid-but-thirty-six-chars-long"),
            None
        );
    }

    #[test]
    fn uuid_header_values_are_accepted_and_trimmed() {
        let id = " 5f2b1c9e-8d7a-4b3c-9e1f-2a6b4c8d0e1a ";
        assert_eq!(
            TraceId::from_header_value(id),
            Some(TraceId("5f2b1c9e-8d7a-4b3c-9e1f-2a6b4c8d0e1a".to_string()))
        );
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TraceId::new(), TraceId::new());
    }

    #[tokio::test]
    async fn current_is_none_outside_a_request_scope() {
        assert_eq!(TraceId::current(), None);
    }
}
