#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use wortkarten_backend::config::Config;
use wortkarten_backend::db::vocabulary::{insert_rows, NewVocabularyRow};
use wortkarten_backend::db::Catalog;
use wortkarten_backend::state::AppState;
use wortkarten_backend::build_app;

pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<Catalog>,
    _dir: TempDir,
}

pub fn row(id: i64, level: &str, german: &str, english: &str) -> NewVocabularyRow {
    NewVocabularyRow {
        id: Some(id),
        level: level.to_string(),
        german: Some(german.to_string()),
        english: Some(english.to_string()),
        example: Some(String::new()),
        category: Some("learning".to_string()),
    }
}

pub fn sample_rows() -> Vec<NewVocabularyRow> {
    vec![
        row(61, "B1.1 (61-90)", "die Rechnung", "the bill"),
        row(3, "B1.1 (1-30)", "der Bahnhof", "the train station"),
        row(1, "B1.1 (1-30)", "die Erfahrung", "the experience"),
        row(2, "B1.1 (1-30)", "der Vorschlag", "the suggestion"),
        row(31, "B1.1 (31-60)", "die Umgebung", "the surroundings"),
        row(201, "B1.2 (1-30)", "die Ausnahme", "the exception"),
        row(101, "A1 (1-30)", "der Apfel", "the apple"),
    ]
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        database_url: format!("sqlite:{}?mode=rwc", dir.path().join("vocabulary.db").display()),
        ..Config::default()
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(sample_rows()).await
}

pub async fn create_test_app_with(rows: Vec<NewVocabularyRow>) -> TestApp {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = test_config(&dir);

    let catalog = Catalog::connect(&config.database_url)
        .await
        .expect("failed to open catalog");
    insert_rows(catalog.pool(), &rows)
        .await
        .expect("failed to insert rows");

    let catalog = Arc::new(catalog);
    let router = build_app(AppState::new(config, Some(Arc::clone(&catalog))));

    TestApp {
        router,
        catalog,
        _dir: dir,
    }
}

pub fn create_app_without_catalog() -> Router {
    build_app(AppState::new(Config::default(), None))
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
