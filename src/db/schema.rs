//! SQL for the `_migrations` tracking table, one flavour per backend.

pub const TRACKING_TABLE: &str = "_migrations";

/// PostgreSQL tracking table:
/// - `id` SERIAL primary key
/// - `name` is the migration filename, UNIQUE
/// - `executed_at` defaults to the time the row is inserted
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS _migrations (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    executed_at TIMESTAMP DEFAULT NOW()
)
"#;

/// SQLite equivalent of [`POSTGRES_INIT`], used for local databases and tests.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS _migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(255) NOT NULL UNIQUE,
    executed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

pub const POSTGRES_FIND_BY_NAME: &str = "SELECT id FROM _migrations WHERE name = $1";
pub const SQLITE_FIND_BY_NAME: &str = "SELECT id FROM _migrations WHERE name = ?";

pub const POSTGRES_INSERT: &str = "INSERT INTO _migrations (name) VALUES ($1)";
pub const SQLITE_INSERT: &str = "INSERT INTO _migrations (name) VALUES (?)";

pub const LIST_APPLIED: &str = "SELECT id, name, executed_at FROM _migrations ORDER BY id";
