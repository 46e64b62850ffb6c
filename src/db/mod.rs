//! Database module: connection handle and migration tracking storage.
//!
//! Layout:
//! - `models.rs`: typed rows of the `_migrations` tracking table
//! - `schema.rs`: tracking table DDL and queries (PostgreSQL and SQLite)
//! - `pool.rs`: the [`Database`] handle and its [`crate::migrations::MigrationStore`] impl

pub mod models;
pub mod pool;
pub mod schema;

pub use models::MigrationRecord;
pub use pool::{Database, redact_url};
