//! Startup SQL migrations.
//!
//! Every `*.sql` file in the migrations directory is applied once, in filename
//! order, and recorded in the `_migrations` tracking table. A file may hold several
//! statements separated by [`STATEMENT_BREAKPOINT`].

pub mod file;
pub mod runner;
pub mod store;

pub use file::{MigrationFile, STATEMENT_BREAKPOINT, discover, split_statements};
pub use runner::{MigrationReport, MigrationStatus, Migrator, run_migrations};
pub use store::MigrationStore;
