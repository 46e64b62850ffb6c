use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::migrations::MigrationStatus;
use crate::server::router::AppState;

pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database = if state.db.is_some() {
        "connected"
    } else {
        "not_configured"
    };
    Json(json!({ "status": "ok", "database": database }))
}

/// Applied migrations from the tracking table plus files still waiting to run.
pub async fn migrations_handler(
    State(state): State<AppState>,
) -> Result<Json<MigrationStatus>, AppError> {
    let db = state.db.as_ref().ok_or(AppError::DatabaseNotConfigured)?;
    let status = state.migrator.status(db).await?;
    Ok(Json(status))
}
