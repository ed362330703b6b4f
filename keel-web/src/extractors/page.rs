//! Validated pagination parameter extraction.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use keel_api_types::{FieldError, LocSegment, PageParams, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use serde_json::json;

use crate::errors::ApiError;

/// Extractor for `page`/`size` query parameters.
///
/// Missing parameters take their defaults (`page=1`, `size=20`); unparsable
/// or out-of-range values are rejected with a 422 envelope whose `data`
/// field carries field-level descriptors naming the offending parameter.
/// An oversized `size` fails rather than being clamped.
#[derive(Debug, Clone, Copy)]
pub struct Page(pub PageParams);

/// Raw form of the parameters, deserialized leniently so parse failures can
/// be attributed to the individual field.
#[derive(Debug, Deserialize)]
struct RawPageParams {
    page: Option<String>,
    size: Option<String>,
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw_query = parts.uri.query().unwrap_or("").to_owned();
        let Query(raw) = Query::<RawPageParams>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                ApiError::validation(vec![FieldError::new(
                    "query_parsing",
                    vec![LocSegment::from("query")],
                    err.to_string(),
                    json!(raw_query),
                )])
            })?;

        let mut errors = Vec::new();
        let page = parse_field(raw.page, "page", 1, &mut errors);
        let size = parse_field(raw.size, "size", DEFAULT_PAGE_SIZE, &mut errors);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let params = PageParams::new(page, size);
        params.validate().map_err(ApiError::validation)?;

        Ok(Page(params))
    }
}

fn parse_field(value: Option<String>, name: &str, default: u64, errors: &mut Vec<FieldError>) -> u64 {
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            errors.push(FieldError::new(
                "int_parsing",
                vec![LocSegment::from("query"), LocSegment::from(name)],
                "Input should be a valid non-negative integer",
                json!(raw),
            ));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_defaults_when_absent() {
        let mut errors = Vec::new();
        assert_eq!(parse_field(None, "page", 1, &mut errors), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_field_names_the_offending_parameter() {
        let mut errors = Vec::new();
        parse_field(Some("abc".to_string()), "page", 1, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "int_parsing");
        assert_eq!(
            errors[0].loc,
            vec![LocSegment::from("query"), LocSegment::from("page")]
        );
        assert_eq!(errors[0].input, json!("abc"));
    }
}
