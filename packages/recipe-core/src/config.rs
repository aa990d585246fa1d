//! Service configuration.

use std::path::PathBuf;

/// Recipe service configuration.
#[derive(Debug, Clone)]
pub struct RecipeConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Maximum pooled connections to the database file
    pub pool_size: u32,
    /// How long a connection waits on a locked database, in milliseconds
    pub busy_timeout_ms: u64,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("recipes.db"),
            pool_size: 4,
            busy_timeout_ms: 5000,
            request_timeout_ms: 5000, // 5 seconds default
        }
    }
}
