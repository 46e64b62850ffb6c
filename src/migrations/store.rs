use std::future::Future;

use crate::db::MigrationRecord;

/// Database operations the migration runner needs.
///
/// Implemented by [`crate::db::Database`] for real connections.
pub trait MigrationStore: Sync {
    /// Create the tracking table if it does not exist yet.
    fn ensure_tracking_table(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Whether a tracking row exists for `name`.
    fn is_applied(&self, name: &str) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Execute a single raw SQL statement.
    fn execute(&self, statement: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Insert the tracking row for `name`.
    fn record_applied(&self, name: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// All tracking rows, oldest first.
    fn applied(&self) -> impl Future<Output = Result<Vec<MigrationRecord>, sqlx::Error>> + Send;
}
