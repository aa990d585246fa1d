//! Recipe CRUD handlers.
//!
//! Validation failures and unknown ids are answered in-band with status
//! 200 and a failure message; only store and transport failures produce
//! other statuses.

use std::fmt::Display;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};
use recipe_core::{RecipeFields, RecipeId};

use super::request_utils::{
    json_response, parse_json_body, read_request_body_with_timeout, run_store_call,
};
use super::response::{
    MessageResponse, RecipeListResponse, RecipeResponse, ValidationFailureResponse, API_RUNNING,
    RECIPE_CREATED, RECIPE_CREATION_FAILED, RECIPE_DETAILS, RECIPE_NOT_FOUND, RECIPE_REMOVED,
    RECIPE_UPDATED, RECIPE_UPDATE_FAILED, REQUIRED_FIELDS_HINT,
};

fn not_found() -> Result<Response<Bytes>, RouterError> {
    json_response(
        200,
        &MessageResponse {
            message: RECIPE_NOT_FOUND,
        },
    )
}

fn validation_failed(message: &'static str) -> Result<Response<Bytes>, RouterError> {
    json_response(
        200,
        &ValidationFailureResponse {
            message,
            required: REQUIRED_FIELDS_HINT,
        },
    )
}

/// Reads and validates a create/update body.
///
/// `Ok(None)` means the body was readable JSON (or empty) but did not pass
/// validation.
async fn read_recipe_fields<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Option<RecipeFields>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let payload = parse_json_body(&body_bytes)?;

    match RecipeFields::from_json(payload.as_ref()) {
        Ok(fields) => Ok(Some(fields)),
        Err(e) => {
            tracing::debug!("Recipe body rejected: {}", e);
            Ok(None)
        }
    }
}

/// Liveness check.
///
/// # Endpoint
/// `GET /`
///
/// # Response
/// ```json
/// {"message": "Recipe API is running"}
/// ```
pub async fn index() -> Result<Response<Bytes>, RouterError> {
    json_response(
        200,
        &MessageResponse {
            message: API_RUNNING,
        },
    )
}

/// Creates a new recipe.
///
/// # Endpoint
/// `POST /recipes`
///
/// # Request Body
/// ```json
/// {
///   "title": "Tea",
///   "making_time": "5 min",
///   "serves": "1",
///   "ingredients": "tea leaves, water",
///   "cost": "3"
/// }
/// ```
///
/// # Response
/// - **200 OK**: The stored row, timestamps included
/// ```json
/// {
///   "message": "Recipe successfully created!",
///   "recipe": [{"id": 1, "title": "Tea", "making_time": "5 min", "serves": "1",
///               "ingredients": "tea leaves, water", "cost": "3",
///               "created_at": "2024-06-01 12:00:00", "updated_at": "2024-06-01 12:00:00"}]
/// }
/// ```
/// - **200 OK**: Missing or empty field
/// ```json
/// {
///   "message": "Recipe creation failed!",
///   "required": "title, making_time, serves, ingredients, cost"
/// }
/// ```
///
/// # Errors
/// - **400 Bad Request**: Body is not valid JSON
/// - **500 Internal Server Error**: Store failure
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:5000/recipes \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Tea", "making_time": "5 min", "serves": "1", "ingredients": "tea leaves, water", "cost": "3"}'
/// ```
pub async fn create_recipe<B>(req: Request<B>, state: AppState) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let Some(fields) = read_recipe_fields(req, &state).await? else {
        return validation_failed(RECIPE_CREATION_FAILED);
    };

    let now = state.clock.now();
    let recipe = run_store_call(&state, move |store| {
        let id = store.insert(&fields, now, now)?;
        store.fetch(id)
    })
    .await?
    .ok_or_else(|| RouterError::InternalError("Created recipe vanished".to_string()))?;

    tracing::info!("Created recipe {}", recipe.id);
    json_response(
        200,
        &RecipeResponse {
            message: RECIPE_CREATED,
            recipe: vec![recipe],
        },
    )
}

/// Lists every recipe.
///
/// # Endpoint
/// `GET /recipes`
///
/// # Response
/// ```json
/// {"recipes": [{"id": 1, "title": "Tea", "making_time": "5 min", "serves": "1",
///               "ingredients": "tea leaves, water", "cost": "3"}]}
/// ```
pub async fn list_recipes(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let recipes = run_store_call(&state, |store| store.list_all()).await?;

    json_response(200, &RecipeListResponse { recipes })
}

/// Reads one recipe.
///
/// # Endpoint
/// `GET /recipes/{id}`
///
/// # Response
/// - **200 OK**: `{"message": "Recipe details by id", "recipe": [<recipe>]}`
/// - **200 OK**: `{"message": "No Recipe found"}`
pub async fn get_recipe(
    id: Option<RecipeId>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let Some(id) = id else {
        return not_found();
    };
    match run_store_call(&state, move |store| store.find_by_id(id)).await? {
        Some(recipe) => json_response(
            200,
            &RecipeResponse {
                message: RECIPE_DETAILS,
                recipe: vec![recipe],
            },
        ),
        None => not_found(),
    }
}

/// Replaces all five fields of a recipe.
///
/// # Endpoint
/// `PATCH /recipes/{id}`
///
/// # Request Body
/// Same shape as `POST /recipes`. Every field is required.
///
/// # Response
/// - **200 OK**: `{"message": "Recipe successfully updated!", "recipe": [<recipe>]}`
/// - **200 OK**: `{"message": "Recipe update failed!", "required": "..."}`
/// - **200 OK**: `{"message": "No Recipe found"}`
///
/// # Notes
/// - The body is validated before the id is looked up
/// - `created_at` is never touched; `updated_at` is refreshed
///
/// # Example
/// ```bash
/// curl -X PATCH http://localhost:5000/recipes/1 \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Green Tea", "making_time": "3 min", "serves": "2", "ingredients": "matcha, water", "cost": "5"}'
/// ```
pub async fn update_recipe<B>(
    req: Request<B>,
    id: Option<RecipeId>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let Some(fields) = read_recipe_fields(req, &state).await? else {
        return validation_failed(RECIPE_UPDATE_FAILED);
    };
    let Some(id) = id else {
        return not_found();
    };

    let now = state.clock.now();
    match run_store_call(&state, move |store| store.update(id, &fields, now)).await? {
        Some(recipe) => {
            tracing::info!("Updated recipe {}", id);
            json_response(
                200,
                &RecipeResponse {
                    message: RECIPE_UPDATED,
                    recipe: vec![recipe],
                },
            )
        }
        None => not_found(),
    }
}

/// Deletes a recipe.
///
/// # Endpoint
/// `DELETE /recipes/{id}`
///
/// # Response
/// - **200 OK**: `{"message": "Recipe successfully removed!"}`
/// - **200 OK**: `{"message": "No Recipe found"}`
pub async fn delete_recipe(
    id: Option<RecipeId>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let Some(id) = id else {
        return not_found();
    };
    if !run_store_call(&state, move |store| store.delete(id)).await? {
        return not_found();
    }

    tracing::info!("Removed recipe {}", id);
    json_response(
        200,
        &MessageResponse {
            message: RECIPE_REMOVED,
        },
    )
}
