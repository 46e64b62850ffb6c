use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Failures raised while opening the database handle.
#[derive(Debug, ThisError)]
pub enum DbError {
    #[error("unsupported database URL scheme: {0}")]
    UnsupportedUrl(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),
}

/// Failures raised while applying migration files.
#[derive(Debug, ThisError)]
pub enum MigrationError {
    #[error("failed to read migrations directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read migration file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("statement {index} of migration {file} failed: {source}")]
    Statement {
        file: String,
        index: usize,
        #[source]
        source: SqlxError,
    },

    #[error("migration tracking table error: {0}")]
    Tracking(#[from] SqlxError),
}

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("No database configured")]
    DatabaseNotConfigured,
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(Box::new(e))
    }
}

impl From<SqlxError> for AppError {
    fn from(e: SqlxError) -> Self {
        AppError::Database(DbError::Sqlx(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            AppError::DatabaseNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: "DATABASE_NOT_CONFIGURED".to_string(),
                    message: "No database is configured for this server.".to_string(),
                },
            ),
            AppError::Config(_) | AppError::Database(_) | AppError::Migration(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_error_names_file_and_index() {
        let err = MigrationError::Statement {
            file: "002_add_col.sql".to_string(),
            index: 1,
            source: SqlxError::Protocol("syntax error".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("002_add_col.sql"));
        assert!(msg.contains("statement 1"));
    }

    #[test]
    fn not_configured_maps_to_503() {
        let resp = AppError::DatabaseNotConfigured.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn database_errors_map_to_500() {
        let resp = AppError::from(SqlxError::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
