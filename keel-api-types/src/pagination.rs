//! Pagination request and response contract.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{FieldError, LocSegment};

/// Hard upper bound on page size. Requests above this fail validation with a
/// 422 rather than being silently clamped.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default page size when the request omits `size`.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Standard pagination query parameters (`page`, `size`).
///
/// Immutable once parsed from the request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (1..=100)
    #[serde(default = "default_size")]
    pub size: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

impl PageParams {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.size
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> u64 {
        self.size
    }

    /// Check range constraints, returning field-level descriptors on failure.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.page == 0 {
            errors.push(FieldError::new(
                "greater_than_equal",
                vec![LocSegment::from("query"), LocSegment::from("page")],
                "Input should be greater than or equal to 1",
                json!(self.page),
            ));
        }
        if self.size == 0 {
            errors.push(FieldError::new(
                "greater_than_equal",
                vec![LocSegment::from("query"), LocSegment::from("size")],
                "Input should be greater than or equal to 1",
                json!(self.size),
            ));
        }
        if self.size > MAX_PAGE_SIZE {
            errors.push(FieldError::new(
                "less_than_equal",
                vec![LocSegment::from("query"), LocSegment::from("size")],
                format!("Input should be less than or equal to {}", MAX_PAGE_SIZE),
                json!(self.size),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Standard paginated response shape.
///
/// `items` holds at most `size` rows; `total` counts all rows matching the
/// unpaginated query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Items for the current page
    pub items: Vec<T>,
    /// Total number of matching rows, ignoring pagination
    pub total: u64,
    /// Current page number
    pub page: u64,
    /// Current page size
    pub size: u64,
}

impl<T> PagedResponse<T> {
    /// Assemble a page from fetched items, the unpaginated total and the
    /// request parameters.
    pub fn new(items: Vec<T>, total: u64, params: &PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            size: params.size,
        }
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PagedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}
