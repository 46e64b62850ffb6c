use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;

/// One row of the `_migrations` tracking table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationRecord {
    pub id: i64,
    /// Filename of the applied migration.
    pub name: String,
    pub executed_at: Option<DateTime<Utc>>,
}

impl MigrationRecord {
    pub(crate) fn from_pg_row(row: PgRow) -> Result<Self, sqlx::Error> {
        let id: i32 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let executed_at: Option<NaiveDateTime> = row.try_get("executed_at")?;
        Ok(Self {
            id: i64::from(id),
            name,
            executed_at: executed_at.map(|ts| ts.and_utc()),
        })
    }

    pub(crate) fn from_sqlite_row(row: SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let executed_at: Option<NaiveDateTime> = row.try_get("executed_at")?;
        Ok(Self {
            id,
            name,
            executed_at: executed_at.map(|ts| ts.and_utc()),
        })
    }
}
