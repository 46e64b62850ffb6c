use crate::db::models::MigrationRecord;
use crate::db::schema::{
    LIST_APPLIED, POSTGRES_FIND_BY_NAME, POSTGRES_INIT, POSTGRES_INSERT, SQLITE_FIND_BY_NAME,
    SQLITE_INIT, SQLITE_INSERT, TRACKING_TABLE,
};
use crate::error::DbError;
use crate::migrations::MigrationStore;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;
use url::Url;

/// Connection handle shared by the migration runner and the HTTP layer.
///
/// Opened once at startup and closed explicitly on shutdown.
#[derive(Clone, Debug)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Open a pool for `url`, choosing the backend from its scheme.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let scheme = url.split_once(':').map(|(s, _)| s).unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => {
                let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
                Ok(Self::Postgres(pool))
            }
            "sqlite" => {
                let connect_opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
                let mut pool_opts = SqlitePoolOptions::new();
                // Every connection to `:memory:` is its own database; pin a single one.
                if url.contains(":memory:") {
                    pool_opts = pool_opts
                        .max_connections(1)
                        .idle_timeout(None)
                        .max_lifetime(None);
                }
                let pool = pool_opts.connect_with(connect_opts).await?;
                Ok(Self::Sqlite(pool))
            }
            other => Err(DbError::UnsupportedUrl(other.to_string())),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Close every pooled connection. Waits for checked-out connections to return.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

impl MigrationStore for Database {
    async fn ensure_tracking_table(&self) -> Result<(), sqlx::Error> {
        debug!(table = TRACKING_TABLE, backend = self.backend(), "ensuring tracking table");
        match self {
            Self::Postgres(pool) => {
                sqlx::raw_sql(POSTGRES_INIT).execute(pool).await?;
            }
            Self::Sqlite(pool) => {
                sqlx::raw_sql(SQLITE_INIT).execute(pool).await?;
            }
        }
        Ok(())
    }

    async fn is_applied(&self, name: &str) -> Result<bool, sqlx::Error> {
        let found = match self {
            Self::Postgres(pool) => sqlx::query(POSTGRES_FIND_BY_NAME)
                .bind(name)
                .fetch_optional(pool)
                .await?
                .is_some(),
            Self::Sqlite(pool) => sqlx::query(SQLITE_FIND_BY_NAME)
                .bind(name)
                .fetch_optional(pool)
                .await?
                .is_some(),
        };
        Ok(found)
    }

    async fn execute(&self, statement: &str) -> Result<(), sqlx::Error> {
        // Unprepared so DDL and dollar-quoted bodies pass through untouched.
        match self {
            Self::Postgres(pool) => {
                sqlx::raw_sql(statement).execute(pool).await?;
            }
            Self::Sqlite(pool) => {
                sqlx::raw_sql(statement).execute(pool).await?;
            }
        }
        Ok(())
    }

    async fn record_applied(&self, name: &str) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query(POSTGRES_INSERT).bind(name).execute(pool).await?;
            }
            Self::Sqlite(pool) => {
                sqlx::query(SQLITE_INSERT).bind(name).execute(pool).await?;
            }
        }
        Ok(())
    }

    async fn applied(&self) -> Result<Vec<MigrationRecord>, sqlx::Error> {
        match self {
            Self::Postgres(pool) => {
                let rows = sqlx::query(LIST_APPLIED).fetch_all(pool).await?;
                rows.into_iter().map(MigrationRecord::from_pg_row).collect()
            }
            Self::Sqlite(pool) => {
                let rows = sqlx::query(LIST_APPLIED).fetch_all(pool).await?;
                rows.into_iter().map(MigrationRecord::from_sqlite_row).collect()
            }
        }
    }
}

/// Replace any password in a connection URL so it can be logged.
pub fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("****"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
