//! Request utilities for HTTP endpoints.

use std::fmt::Display;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::Serialize;
use serde_json::Value;
use tokio::time;

use crate::router::{AppState, RouterError};
use recipe_core::error::Result as StoreResult;
use recipe_core::{RecipeId, RecipeStore};

/// Helper function to read request body with timeout
pub(crate) async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Decodes a JSON request body. An empty body decodes to `None`.
pub(crate) fn parse_json_body(bytes: &[u8]) -> Result<Option<Value>, RouterError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Runs a blocking store call off the async workers.
///
/// The call is not bounded by a timeout: once a write is handed to the
/// store it either commits or fails, and the response reports which.
pub(crate) async fn run_store_call<T, F>(state: &AppState, call: F) -> Result<T, RouterError>
where
    T: Send + 'static,
    F: FnOnce(&dyn RecipeStore) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || call(store.as_ref()))
        .await
        .map_err(|e| RouterError::InternalError(format!("Store task failed: {}", e)))?;

    Ok(result?)
}

/// Parses the `{id}` path segment.
///
/// Anything but an unsigned integer is treated as an unmatched route. An
/// integer too large for [`RecipeId`] routes but can never name a stored
/// recipe, so it parses to `None`.
pub fn parse_recipe_id(raw: &str) -> Result<Option<RecipeId>, RouterError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RouterError::NotFound(format!("No route found for /recipes/{}", raw)));
    }
    Ok(raw.parse().ok())
}

/// Helper to build HTTP response with proper error handling
pub(crate) fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Serializes `body` and wraps it in a JSON response.
pub(crate) fn json_response<T: Serialize>(
    status: u16,
    body: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(body)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_id_accepts_only_unsigned_integers() {
        assert_eq!(parse_recipe_id("1").unwrap(), Some(1));
        assert_eq!(parse_recipe_id("0042").unwrap(), Some(42));
        assert_eq!(parse_recipe_id("3000000000").unwrap(), Some(3_000_000_000));

        for raw in ["", "-1", "+1", "abc", "1.5", " 1"] {
            assert!(
                matches!(parse_recipe_id(raw), Err(RouterError::NotFound(_))),
                "{:?} should not route",
                raw
            );
        }
    }

    #[test]
    fn oversized_recipe_id_names_nothing() {
        assert_eq!(parse_recipe_id("9223372036854775807").unwrap(), Some(i64::MAX));
        assert_eq!(parse_recipe_id("9223372036854775808").unwrap(), None);
        assert_eq!(parse_recipe_id("99999999999999999999").unwrap(), None);
    }

    #[test]
    fn empty_body_decodes_to_none() {
        assert!(parse_json_body(b"").unwrap().is_none());
        assert!(parse_json_body(b" \n").unwrap().is_none());
        assert_eq!(parse_json_body(b"null").unwrap(), Some(Value::Null));
    }

    #[test]
    fn malformed_body_is_bad_request() {
        assert!(matches!(
            parse_json_body(b"{\"title\":"),
            Err(RouterError::BadRequest(_))
        ));
    }
}
