pub mod config;
pub mod db;
pub mod error;
pub mod migrations;
pub mod server;
pub mod startup;

pub use config::Config;
pub use db::Database;
pub use error::{AppError, DbError, MigrationError};
