//! Classified API errors and their conversion to envelope responses.
//!
//! The error surface is a closed enum: classified business errors carrying an
//! HTTP status and business code, request validation failures carrying
//! field-level descriptors, and unclassified internal errors whose detail is
//! logged server-side and never echoed to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keel_api_types::{Envelope, FieldError};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// The classified business error kinds and their fixed HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
}

impl BusinessKind {
    /// HTTP status associated with this kind.
    pub fn status(self) -> StatusCode {
        match self {
            BusinessKind::BadRequest => StatusCode::BAD_REQUEST,
            BusinessKind::Unauthorized => StatusCode::UNAUTHORIZED,
            BusinessKind::Forbidden => StatusCode::FORBIDDEN,
            BusinessKind::NotFound => StatusCode::NOT_FOUND,
            BusinessKind::Conflict => StatusCode::CONFLICT,
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            BusinessKind::BadRequest => "Bad Request",
            BusinessKind::Unauthorized => "Unauthorized",
            BusinessKind::Forbidden => "Forbidden",
            BusinessKind::NotFound => "Not Found",
            BusinessKind::Conflict => "Conflict",
        }
    }
}

/// Error type for HTTP API operations.
///
/// `IntoResponse` is the single mapping point from errors to wire responses;
/// nothing below the handler boundary needs its own handling to produce a
/// client-facing envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A classified business error. `code` defaults to the HTTP status when
    /// not set explicitly; `data` carries optional structured detail.
    #[error("{message}")]
    Business {
        kind: BusinessKind,
        code: Option<i32>,
        message: String,
        data: Option<JsonValue>,
    },

    /// Request/schema validation failure, rendered as a 422 with the
    /// field-level descriptors in `data`.
    #[error("validation failed for {} field(s)", .errors.len())]
    Validation { errors: Vec<FieldError> },

    /// Any unclassified error. The client receives a generic 500 envelope;
    /// the full chain is logged at error severity server-side only.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn business(kind: BusinessKind, message: impl Into<String>) -> Self {
        ApiError::Business {
            kind,
            code: None,
            message: message.into(),
            data: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::business(BusinessKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::business(BusinessKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::business(BusinessKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::business(BusinessKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::business(BusinessKind::Conflict, message)
    }

    /// A classified error with the kind's stock message.
    pub fn from_kind(kind: BusinessKind) -> Self {
        Self::business(kind, kind.default_message())
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        ApiError::Validation { errors }
    }

    /// Wrap an unclassified error into the internal channel.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        ApiError::Internal(err.into())
    }

    /// Override the business code (no effect on validation/internal errors).
    pub fn with_code(mut self, business_code: i32) -> Self {
        if let ApiError::Business { ref mut code, .. } = self {
            *code = Some(business_code);
        }
        self
    }

    /// Attach structured detail (no effect on validation/internal errors).
    pub fn with_data(mut self, detail: JsonValue) -> Self {
        if let ApiError::Business { ref mut data, .. } = self {
            *data = Some(detail);
        }
        self
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Business { kind, .. } => kind.status(),
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation { errors }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Business {
                kind,
                code,
                message,
                data,
            } => {
                let status = kind.status();
                let code = code.unwrap_or_else(|| i32::from(status.as_u16()));
                tracing::warn!(code, status = status.as_u16(), %message, "business error");
                (status, Json(Envelope::of(code, message, data))).into_response()
            }
            ApiError::Validation { errors } => {
                tracing::warn!(fields = errors.len(), "request validation failed");
                let data = serde_json::to_value(&errors).unwrap_or(JsonValue::Null);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(Envelope::of(422, "Unprocessable Entity", Some(data))),
                )
                    .into_response()
            }
            ApiError::Internal(err) => {
                // Full detail stays server-side; the client sees a fixed message.
                tracing::error!(error = ?err, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::<JsonValue>::of(500, "Internal Server Error", None)),
                )
                    .into_response()
            }
        }
    }
}
