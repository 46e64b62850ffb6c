use axum::{Router, routing::get};
use std::sync::Arc;

use crate::db::Database;
use crate::migrations::Migrator;
use crate::server::handlers::{health_handler, migrations_handler};

#[derive(Clone)]
pub struct AppState {
    pub db: Option<Database>,
    pub migrator: Arc<Migrator>,
}

impl AppState {
    pub fn new(db: Option<Database>, migrator: Migrator) -> Self {
        Self {
            db,
            migrator: Arc::new(migrator),
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/migrations", get(migrations_handler))
        .with_state(state)
}
