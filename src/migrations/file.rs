use crate::error::MigrationError;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const MIGRATION_EXTENSION: &str = "sql";

/// Literal line separating independently executed statements in one file.
pub const STATEMENT_BREAKPOINT: &str = "--> statement-breakpoint";

/// A `.sql` file in the migrations directory. Its filename is the tracking key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub name: String,
    pub path: PathBuf,
}

impl MigrationFile {
    /// Read the file and split it into executable statements.
    pub fn read_statements(&self) -> Result<Vec<String>, MigrationError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| MigrationError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        Ok(split_statements(&contents)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }
}

/// List migration files in `dir`, sorted by filename.
///
/// Returns `Ok(None)` when the directory does not exist.
pub fn discover(dir: &Path) -> Result<Option<Vec<MigrationFile>>, MigrationError> {
    if !dir.exists() {
        info!(path = %dir.display(), "migrations directory not found; skipping");
        return Ok(None);
    }

    let entries = fs::read_dir(dir).map_err(|source| MigrationError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<MigrationFile> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!(error = %e, "failed to read migrations dir entry");
                None
            }
        })
        .filter(|path| path.is_file() && is_migration_file(path))
        .filter_map(|path| {
            let name = path.file_name()?.to_str().map(str::to_owned);
            if name.is_none() {
                warn!(path = %path.display(), "skipping migration with non UTF-8 filename");
            }
            Some(MigrationFile { name: name?, path })
        })
        .collect();

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Some(files))
}

/// Split file contents at [`STATEMENT_BREAKPOINT`], dropping blank segments.
pub fn split_statements(sql: &str) -> Vec<&str> {
    sql.split(STATEMENT_BREAKPOINT)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_migration_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(MIGRATION_EXTENSION))
        == Some(true)
}
