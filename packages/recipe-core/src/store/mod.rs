//! Row-level access to the `recipes` table.

mod sqlite;

pub use sqlite::{SqliteRecipeStore, MIGRATIONS};

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::recipe::{Recipe, RecipeFields, RecipeId, RecipeSummary};

/// Storage capability injected into the request handlers.
///
/// Calls are blocking. Each one acquires its own connection and releases
/// it before returning; nothing is cached between calls.
pub trait RecipeStore: Send + Sync {
    /// Inserts one row and returns the id the store assigned to it.
    fn insert(
        &self,
        fields: &RecipeFields,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<RecipeId>;

    /// Full row, timestamps included.
    fn fetch(&self, id: RecipeId) -> Result<Option<Recipe>>;

    /// Every row in store order.
    fn list_all(&self) -> Result<Vec<RecipeSummary>>;

    fn find_by_id(&self, id: RecipeId) -> Result<Option<RecipeSummary>>;

    /// Overwrites all mutable columns of `id`.
    ///
    /// Returns `None` without writing anything when the row does not exist.
    fn update(
        &self,
        id: RecipeId,
        fields: &RecipeFields,
        updated_at: NaiveDateTime,
    ) -> Result<Option<RecipeSummary>>;

    /// Hard delete. Returns `false` when there was nothing to delete.
    fn delete(&self, id: RecipeId) -> Result<bool>;
}
