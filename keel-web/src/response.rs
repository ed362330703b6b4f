//! Handler return values and envelope wrapping.
//!
//! A handler's declared result is either a value to wrap or a raw response
//! to pass through. The sum type makes the boundary explicit instead of
//! sniffing return values at runtime, and the declared output type for a
//! handler returning `T` is `Envelope<T>`, so generated API docs show the
//! true wire shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keel_api_types::Envelope;
use serde::Serialize;

use crate::errors::ApiError;

/// Result type for API handlers.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// A handler outcome: a payload to wrap in the success envelope, a payload
/// at an explicitly declared status, or a raw response emitted untouched.
pub enum ApiResponse<T> {
    /// Wrap as `{code: 0, message: "Success", data: <value>}` with HTTP 200
    Value(T),
    /// Same envelope, emitted at the declared status
    Status(StatusCode, T),
    /// A framework-native response, never re-wrapped
    Raw(Response),
}

impl<T> ApiResponse<T> {
    pub fn value(value: T) -> Self {
        ApiResponse::Value(value)
    }

    pub fn with_status(status: StatusCode, value: T) -> Self {
        ApiResponse::Status(status, value)
    }

    /// Wrap a payload at HTTP 201.
    pub fn created(value: T) -> Self {
        ApiResponse::Status(StatusCode::CREATED, value)
    }

    /// Pass a framework-native response through unmodified.
    pub fn raw(response: impl IntoResponse) -> Self {
        ApiResponse::Raw(response.into_response())
    }
}

impl ApiResponse<()> {
    /// A bodyless success; serializes as `data: null`.
    pub fn empty() -> Self {
        ApiResponse::Value(())
    }
}

impl<T> From<T> for ApiResponse<T> {
    fn from(value: T) -> Self {
        ApiResponse::Value(value)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Value(value) => {
                (StatusCode::OK, Json(Envelope::ok(value))).into_response()
            }
            ApiResponse::Status(status, value) => {
                (status, Json(Envelope::ok(value))).into_response()
            }
            ApiResponse::Raw(response) => response,
        }
    }
}

/// Shorthand for `Ok(ApiResponse::Value(value))`.
pub fn ok<T>(value: T) -> ApiResult<T> {
    Ok(ApiResponse::Value(value))
}

/// Shorthand for `Ok(ApiResponse::created(value))`.
pub fn created<T>(value: T) -> ApiResult<T> {
    Ok(ApiResponse::created(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_wraps() {
        let response: ApiResponse<u32> = 7u32.into();
        assert!(matches!(response, ApiResponse::Value(7)));
    }

    #[test]
    fn created_declares_201() {
        let response = ApiResponse::created("row");
        assert!(matches!(
            response,
            ApiResponse::Status(StatusCode::CREATED, "row")
        ));
    }
}
