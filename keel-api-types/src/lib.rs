//! Shared wire-shape types for Keel APIs
//!
//! This crate defines the response envelope, pagination contract and
//! validation-error payload used by both the web and storage layers, so the
//! two sides agree on one set of serialized shapes.

pub mod envelope;
pub mod errors;
pub mod pagination;

// Re-export main types for convenience
pub use envelope::Envelope;
pub use errors::{FieldError, LocSegment};
pub use pagination::{PagedResponse, PageParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
