//! HTTP endpoint implementations for recipe records.

mod recipe_handlers;
mod request_utils;
mod response;

pub use recipe_handlers::{
    create_recipe, delete_recipe, get_recipe, index, list_recipes, update_recipe,
};
pub use request_utils::parse_recipe_id;
pub use response::{
    error_response, ApiError, ErrorResponse, MessageResponse, RecipeListResponse, RecipeResponse,
    ValidationFailureResponse,
};
