//! REST API server for recipe records.
//!
//! Provides the HTTP endpoints for creating, listing, reading, updating
//! and deleting recipes, and the request routing in front of them.

pub mod handlers;
pub mod router;
pub mod server;
