//! Core of the recipe service.
//!
//! Provides the recipe domain types, required-field validation,
//! the storage trait with its SQLite implementation, and configuration.

pub mod clock;
pub mod config;
pub mod error;
pub mod recipe;
pub mod schema;
pub mod store;

mod model;

pub use clock::{Clock, SystemClock};
pub use recipe::{Recipe, RecipeFields, RecipeId, RecipeSummary};
pub use store::{RecipeStore, SqliteRecipeStore};
