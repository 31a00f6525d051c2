//! Database layer for catalog access.
//!
//! This module implements read-only data access using SQLx with SQLite, following the
//! Repository pattern:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - query construction)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   SQLite    │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Migrations
//!
//! Migrations live in the `migrations/` directory and only create the catalog tables when they
//! are missing. The [`crate::migrator`] function provides access to the migrator.

pub mod errors;
pub mod handlers;
pub mod models;

use crate::config::Config;
use sqlx::{
    ConnectOptions, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use log::LevelFilter;
use tracing::info;

/// Open a connection pool to the catalog described by `config`.
pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    let database = &config.database;

    let options = SqliteConnectOptions::from_str(&database.url)?
        .read_only(database.read_only)
        .create_if_missing(!database.read_only)
        .log_slow_statements(LevelFilter::Warn, config.slow_statement_threshold());

    let pool = SqlitePoolOptions::new()
        .max_connections(database.pool.max_connections)
        .min_connections(database.pool.min_connections)
        .acquire_timeout(database.pool.acquire_timeout())
        .idle_timeout(database.pool.idle_timeout())
        .max_lifetime(database.pool.max_lifetime())
        .connect_with(options)
        .await?;

    info!(
        "Connected to catalog database (read_only: {}, max_connections: {})",
        database.read_only, database.pool.max_connections
    );

    Ok(pool)
}
