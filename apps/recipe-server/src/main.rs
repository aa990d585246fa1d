//! Recipe API server.
//!
//! Opens the SQLite store, bootstraps its schema, and serves the REST API
//! until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use recipe_api::{router::Router, server::Server};
use recipe_core::config::RecipeConfig;
use recipe_core::{SqliteRecipeStore, SystemClock};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the recipe server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// SQLite database file
    #[arg(long, default_value = "recipes.db")]
    database: PathBuf,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = 4)]
    pool_size: u32,

    /// How long a connection waits on a locked database, in milliseconds
    #[arg(long, default_value_t = 5000)]
    busy_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(RecipeConfig {
        database_path: args.database.clone(),
        pool_size: args.pool_size,
        busy_timeout_ms: args.busy_timeout_ms,
        request_timeout_ms: args.request_timeout_ms,
    });

    let store = SqliteRecipeStore::open(&config).with_context(|| {
        format!(
            "Failed to open recipe store at {}",
            config.database_path.display()
        )
    })?;

    let router = Router::new(Arc::new(store), Arc::new(SystemClock), config.clone());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let server = Server::new(addr, router);

    tracing::info!("Starting recipe server...");
    tracing::info!("  Host: {}", args.host);
    tracing::info!("  Port: {}", args.port);
    tracing::info!("  Database: {}", args.database.display());
    tracing::info!("  Request timeout: {} ms", args.request_timeout_ms);

    let mut server_handle = tokio::spawn(server.serve());

    tokio::select! {
        result = &mut server_handle => {
            result.context("Server task panicked")?.context("Server error")?;
        }
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl_c")?;
            tracing::info!("Shutting down server...");
            server_handle.abort();
        }
    }

    Ok(())
}
