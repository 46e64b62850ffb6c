use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use sandwich_platform::{
    Database,
    migrations::{Migrator, run_migrations},
    server::{AppState, app_router},
};
use serde_json::Value;
use std::{fs, path::Path};
use tower::ServiceExt;

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json: Value = serde_json::from_slice(&body).expect("response body was not json");
    (status, json)
}

fn app_without_database(dir: &Path) -> Router {
    app_router(AppState::new(None, Migrator::new(dir)))
}

#[tokio::test]
async fn health_reports_missing_database() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (status, body) = get_json(app_without_database(tmp.path()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "not_configured");
}

#[tokio::test]
async fn migrations_endpoint_needs_a_database() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (status, body) = get_json(app_without_database(tmp.path()), "/api/migrations").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "DATABASE_NOT_CONFIGURED");
}

#[tokio::test]
async fn migrations_endpoint_lists_applied_and_pending() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let migrations = tmp.path().join("migrations");
    fs::create_dir(&migrations).expect("mkdir");
    fs::write(
        migrations.join("001_init.sql"),
        "CREATE TABLE IF NOT EXISTS hosts (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
    )
    .expect("write migration");

    let url = format!("sqlite:{}", tmp.path().join("platform.sqlite").display());
    let db = Database::connect(&url).await.expect("sqlite should open");
    run_migrations(Some(&db), &migrations).await;

    fs::write(
        migrations.join("002_add_email.sql"),
        "ALTER TABLE hosts ADD COLUMN email TEXT;",
    )
    .expect("write migration");

    let app = app_router(AppState::new(Some(db.clone()), Migrator::new(&migrations)));

    let (status, body) = get_json(app.clone(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    let (status, body) = get_json(app, "/api/migrations").await;
    assert_eq!(status, StatusCode::OK);
    let applied = body["applied"].as_array().expect("applied is an array");
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0]["name"], "001_init.sql");
    assert!(applied[0]["executed_at"].is_string());
    assert_eq!(body["pending"], serde_json::json!(["002_add_email.sql"]));

    db.close().await;
}
