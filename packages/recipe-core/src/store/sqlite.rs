//! SQLite-backed recipe store using Diesel.

use std::fs;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::RecipeStore;
use crate::config::RecipeConfig;
use crate::error::{Result, StoreError};
use crate::model::{NewRecipeRow, RecipeChangeset, RecipeRow, RecipeSummaryRow};
use crate::recipe::{Recipe, RecipeFields, RecipeId, RecipeSummary};
use crate::schema::recipes;

/// Schema bootstrap compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Pragmas applied to every connection the pool opens.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms))
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Recipe store over a pooled SQLite database file.
pub struct SqliteRecipeStore {
    pool: DbPool,
}

impl SqliteRecipeStore {
    /// Opens (creating if needed) the database file and applies any
    /// pending schema bootstrap.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the bootstrap fails.
    pub fn open(config: &RecipeConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let database_url = config.database_path.to_string_lossy();
        let manager = ConnectionManager::<SqliteConnection>::new(database_url.as_ref());
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: config.busy_timeout_ms,
            }))
            .build(manager)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations()?;
        tracing::info!(
            "Recipe store ready at {}",
            config.database_path.display()
        );
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        for version in applied {
            tracing::info!("Applied schema migration {}", version);
        }
        Ok(())
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

impl RecipeStore for SqliteRecipeStore {
    fn insert(
        &self,
        fields: &RecipeFields,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<RecipeId> {
        let mut conn = self.conn()?;

        diesel::insert_into(recipes::table)
            .values(&NewRecipeRow::new(fields, &created_at, &updated_at))
            .execute(&mut conn)?;

        // Same connection, so this is our row's id.
        let id = diesel::select(diesel::dsl::sql::<BigInt>("last_insert_rowid()"))
            .get_result::<RecipeId>(&mut conn)?;
        tracing::debug!("Inserted recipe {}", id);
        Ok(id)
    }

    fn fetch(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let mut conn = self.conn()?;

        let row: Option<RecipeRow> = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Recipe::try_from).transpose()
    }

    fn list_all(&self) -> Result<Vec<RecipeSummary>> {
        let mut conn = self.conn()?;

        let rows: Vec<RecipeSummaryRow> = recipes::table
            .select(RecipeSummaryRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(RecipeSummary::from).collect())
    }

    fn find_by_id(&self, id: RecipeId) -> Result<Option<RecipeSummary>> {
        let mut conn = self.conn()?;

        let row: Option<RecipeSummaryRow> = recipes::table
            .find(id)
            .select(RecipeSummaryRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(RecipeSummary::from))
    }

    fn update(
        &self,
        id: RecipeId,
        fields: &RecipeFields,
        updated_at: NaiveDateTime,
    ) -> Result<Option<RecipeSummary>> {
        let mut conn = self.conn()?;

        let changed = diesel::update(recipes::table.find(id))
            .set(&RecipeChangeset::new(fields, &updated_at))
            .execute(&mut conn)?;
        if changed == 0 {
            return Ok(None);
        }

        let row: Option<RecipeSummaryRow> = recipes::table
            .find(id)
            .select(RecipeSummaryRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(RecipeSummary::from))
    }

    fn delete(&self, id: RecipeId) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(recipes::table.find(id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_timestamp;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    fn open_temp() -> (tempfile::TempDir, SqliteRecipeStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = RecipeConfig {
            database_path: dir.path().join("recipes.db"),
            ..Default::default()
        };
        let store = SqliteRecipeStore::open(&config).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_recipes_table() {
        let (_dir, store) = open_temp();
        let mut conn = store.conn().unwrap();

        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(tables, vec!["recipes".to_string()]);
    }

    #[test]
    fn open_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = RecipeConfig {
            database_path: dir.path().join("nested/data/recipes.db"),
            ..Default::default()
        };
        SqliteRecipeStore::open(&config).unwrap();
        assert!(config.database_path.exists());
    }

    #[test]
    fn corrupt_timestamp_is_a_store_error() {
        let (_dir, store) = open_temp();
        let mut conn = store.conn().unwrap();
        diesel::sql_query(
            "INSERT INTO recipes (title, making_time, serves, ingredients, cost, created_at, updated_at) \
             VALUES ('a', 'b', 'c', 'd', 'e', 'yesterday', 'today')",
        )
        .execute(&mut conn)
        .unwrap();
        drop(conn);

        let err = store.fetch(1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CorruptTimestamp { column: "created_at", .. }
        ));
        // The projection without timestamps still reads fine.
        assert!(store.find_by_id(1).unwrap().is_some());
    }

    #[test]
    fn missing_table_is_a_query_error() {
        let (_dir, store) = open_temp();
        let mut conn = store.conn().unwrap();
        diesel::sql_query("DROP TABLE recipes")
            .execute(&mut conn)
            .unwrap();
        drop(conn);

        let ts = parse_timestamp("2024-01-01 00:00:00").unwrap();
        let fields = RecipeFields {
            title: "t".into(),
            making_time: "m".into(),
            serves: "s".into(),
            ingredients: "i".into(),
            cost: "c".into(),
        };
        assert!(matches!(
            store.insert(&fields, ts, ts),
            Err(StoreError::Query(_))
        ));
        assert!(matches!(store.list_all(), Err(StoreError::Query(_))));
    }
}
