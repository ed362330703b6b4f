//! JSON body extraction with schema validation.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use keel_api_types::{FieldError, LocSegment};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::errors::ApiError;

/// `Json<T>` plus constraint validation via `validator::Validate`.
///
/// Both malformed bodies and constraint violations reject with a 422
/// envelope carrying `{"type", "loc", "msg", "input"}` descriptors, with
/// `loc` rooted at `"body"`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| {
                ApiError::validation(vec![FieldError::new(
                    "json_invalid",
                    vec![LocSegment::from("body")],
                    rejection.body_text(),
                    JsonValue::Null,
                )])
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::validation(field_errors(&errors)))?;

        Ok(ValidJson(value))
    }
}

fn field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut flattened: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let msg = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for field '{}'", field));
                let input = err.params.get("value").cloned().unwrap_or(JsonValue::Null);
                FieldError::new(
                    err.code.to_string(),
                    vec![LocSegment::from("body"), LocSegment::from(field.clone())],
                    msg,
                    input,
                )
            })
        })
        .collect();

    // HashMap iteration order is arbitrary; keep the payload deterministic.
    let loc_key =
        |err: &FieldError| serde_json::to_string(&err.loc).unwrap_or_default();
    flattened.sort_by(|a, b| loc_key(a).cmp(&loc_key(b)));
    flattened
}
