use crate::config::Config;
use crate::db::{Database, redact_url};
use crate::migrations::run_migrations;
use tracing::{error, info};

/// Open the configured database and bring its schema up to date.
///
/// Returns `None` when no database URL is configured or the connection cannot be
/// opened. Neither case stops startup.
pub async fn prepare_database(cfg: &Config) -> Option<Database> {
    let db = match cfg.database_url() {
        None => {
            info!("no database URL configured; running without a database");
            None
        }
        Some(url) => match Database::connect(url).await {
            Ok(db) => {
                info!(database_url = %redact_url(url), backend = db.backend(), "connected to database");
                Some(db)
            }
            Err(e) => {
                error!(database_url = %redact_url(url), error = %e, "failed to connect to database");
                None
            }
        },
    };

    run_migrations(db.as_ref(), &cfg.migrations_dir).await;
    db
}
