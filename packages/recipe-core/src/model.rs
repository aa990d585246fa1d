//! Diesel row types for the `recipes` table.

use diesel::prelude::*;

use crate::clock::{format_timestamp, parse_timestamp};
use crate::error::{Result, StoreError};
use crate::recipe::{Recipe, RecipeFields, RecipeId, RecipeSummary};
use crate::schema::recipes;

/// Full row, as selected for the create response.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RecipeRow {
    pub id: RecipeId,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StoreError;

    fn try_from(row: RecipeRow) -> Result<Self> {
        let created_at =
            parse_timestamp(&row.created_at).ok_or_else(|| StoreError::CorruptTimestamp {
                column: "created_at",
                value: row.created_at.clone(),
            })?;
        let updated_at =
            parse_timestamp(&row.updated_at).ok_or_else(|| StoreError::CorruptTimestamp {
                column: "updated_at",
                value: row.updated_at.clone(),
            })?;

        Ok(Recipe {
            id: row.id,
            title: row.title,
            making_time: row.making_time,
            serves: row.serves,
            ingredients: row.ingredients,
            cost: row.cost,
            created_at,
            updated_at,
        })
    }
}

/// Timestamp-free projection.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RecipeSummaryRow {
    pub id: RecipeId,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
}

impl From<RecipeSummaryRow> for RecipeSummary {
    fn from(row: RecipeSummaryRow) -> Self {
        RecipeSummary {
            id: row.id,
            title: row.title,
            making_time: row.making_time,
            serves: row.serves,
            ingredients: row.ingredients,
            cost: row.cost,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub title: &'a str,
    pub making_time: &'a str,
    pub serves: &'a str,
    pub ingredients: &'a str,
    pub cost: &'a str,
    pub created_at: String,
    pub updated_at: String,
}

impl<'a> NewRecipeRow<'a> {
    pub fn new(
        fields: &'a RecipeFields,
        created_at: &chrono::NaiveDateTime,
        updated_at: &chrono::NaiveDateTime,
    ) -> Self {
        Self {
            title: &fields.title,
            making_time: &fields.making_time,
            serves: &fields.serves,
            ingredients: &fields.ingredients,
            cost: &fields.cost,
            created_at: format_timestamp(created_at),
            updated_at: format_timestamp(updated_at),
        }
    }
}

/// Every mutable column; `id` and `created_at` are never part of an update.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChangeset<'a> {
    pub title: &'a str,
    pub making_time: &'a str,
    pub serves: &'a str,
    pub ingredients: &'a str,
    pub cost: &'a str,
    pub updated_at: String,
}

impl<'a> RecipeChangeset<'a> {
    pub fn new(fields: &'a RecipeFields, updated_at: &chrono::NaiveDateTime) -> Self {
        Self {
            title: &fields.title,
            making_time: &fields.making_time,
            serves: &fields.serves,
            ingredients: &fields.ingredients,
            cost: &fields.cost,
            updated_at: format_timestamp(updated_at),
        }
    }
}
