//! Response types and helpers for HTTP endpoints.

use serde::Serialize;

use recipe_core::RecipeSummary;

pub(crate) const API_RUNNING: &str = "Recipe API is running";
pub(crate) const RECIPE_CREATED: &str = "Recipe successfully created!";
pub(crate) const RECIPE_CREATION_FAILED: &str = "Recipe creation failed!";
pub(crate) const RECIPE_DETAILS: &str = "Recipe details by id";
pub(crate) const RECIPE_UPDATED: &str = "Recipe successfully updated!";
pub(crate) const RECIPE_UPDATE_FAILED: &str = "Recipe update failed!";
pub(crate) const RECIPE_REMOVED: &str = "Recipe successfully removed!";
pub(crate) const RECIPE_NOT_FOUND: &str = "No Recipe found";

/// Reported alongside a validation failure.
pub(crate) const REQUIRED_FIELDS_HINT: &str = "title, making_time, serves, ingredients, cost";

/// Body carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body returned when a create or update payload is incomplete.
#[derive(Debug, Serialize)]
pub struct ValidationFailureResponse {
    pub message: &'static str,
    pub required: &'static str,
}

/// Message plus a one-element `recipe` array.
#[derive(Debug, Serialize)]
pub struct RecipeResponse<T> {
    pub message: &'static str,
    pub recipe: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
}

/// Consistent API error response wrapper
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code (HTTP status code as string)
    pub code: String,
    /// Error message
    pub message: String,
    /// Optional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Envelope for transport-level failures (every non-200 response)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false for error responses
    pub success: bool,
    /// Error information
    pub error: ApiError,
}

/// Helper to create error response
pub fn error_response(code: u16, message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message,
            details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_hint_lists_every_required_field() {
        assert_eq!(
            REQUIRED_FIELDS_HINT,
            recipe_core::recipe::REQUIRED_FIELDS.join(", ")
        );
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(error_response(404, "gone".to_string(), None)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "404");
        assert!(json["error"].get("details").is_none());
    }
}
