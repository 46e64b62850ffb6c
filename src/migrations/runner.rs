use crate::db::MigrationRecord;
use crate::error::MigrationError;
use crate::migrations::file::{self, MigrationFile};
use crate::migrations::store::MigrationStore;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Outcome of one [`Migrator::apply_pending`] pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Files applied during this pass, in execution order.
    pub applied: Vec<String>,
    /// Files skipped because a tracking row already existed.
    pub skipped: usize,
}

/// Applied rows and the files that have no row yet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied: Vec<MigrationRecord>,
    pub pending: Vec<String>,
}

/// Applies the `.sql` files of one directory against a [`MigrationStore`].
#[derive(Debug, Clone)]
pub struct Migrator {
    dir: PathBuf,
}

impl Migrator {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Apply every file without a tracking row, in filename order.
    ///
    /// Stops at the first failing statement. Statements that already ran in the
    /// failing file are not rolled back and the file is left unrecorded.
    pub async fn apply_pending<S: MigrationStore>(
        &self,
        store: &S,
    ) -> Result<MigrationReport, MigrationError> {
        store.ensure_tracking_table().await?;

        let Some(files) = file::discover(&self.dir)? else {
            return Ok(MigrationReport::default());
        };

        let mut report = MigrationReport::default();
        for migration in files {
            if store.is_applied(&migration.name).await? {
                debug!(file = %migration.name, "migration already applied; skipping");
                report.skipped += 1;
                continue;
            }
            self.apply_file(store, &migration).await?;
            report.applied.push(migration.name);
        }

        if report.applied.is_empty() {
            info!("All migrations already applied");
        } else {
            info!(
                count = report.applied.len(),
                "Applied {} new migration(s)",
                report.applied.len()
            );
        }
        Ok(report)
    }

    async fn apply_file<S: MigrationStore>(
        &self,
        store: &S,
        migration: &MigrationFile,
    ) -> Result<(), MigrationError> {
        let start = Instant::now();
        let statements = migration.read_statements()?;
        info!(file = %migration.name, statements = statements.len(), "applying migration");

        for (index, statement) in statements.iter().enumerate() {
            store
                .execute(statement)
                .await
                .map_err(|source| MigrationError::Statement {
                    file: migration.name.clone(),
                    index,
                    source,
                })?;
        }
        store.record_applied(&migration.name).await?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(file = %migration.name, elapsed_ms, "migration recorded");
        Ok(())
    }

    /// Compare the directory against the tracking table without applying anything.
    pub async fn status<S: MigrationStore>(
        &self,
        store: &S,
    ) -> Result<MigrationStatus, MigrationError> {
        store.ensure_tracking_table().await?;
        let applied = store.applied().await?;
        let pending = file::discover(&self.dir)?
            .unwrap_or_default()
            .into_iter()
            .filter(|f| !applied.iter().any(|r| r.name == f.name))
            .map(|f| f.name)
            .collect();
        Ok(MigrationStatus { applied, pending })
    }
}

/// Startup entry point: apply pending migrations and never fail the caller.
///
/// `None` means no database is configured; that is logged and treated as success.
/// Any other failure is logged and swallowed so the server keeps starting; the
/// unrecorded files are retried on the next start.
pub async fn run_migrations<S: MigrationStore>(store: Option<&S>, dir: &Path) {
    let Some(store) = store else {
        info!("no database configured; skipping database migrations");
        return;
    };

    info!(path = %dir.display(), "running database migrations");
    if let Err(e) = Migrator::new(dir).apply_pending(store).await {
        error!(error = %e, "database migration failed; continuing startup");
    }
}
