#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use goldenglobes_service::models::AwardRecord;
use goldenglobes_service::services::InMemoryAwardStore;
use goldenglobes_service::startup::{build_service, AppState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

pub struct TestApp {
    pub store: Arc<InMemoryAwardStore>,
    pub router: NormalizePath<Router>,
}

impl TestApp {
    pub fn with_records(records: Vec<AwardRecord>) -> Self {
        let store = Arc::new(InMemoryAwardStore::with_records(records));
        let router = build_service(AppState::new(store.clone()));
        Self { store, router }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, body)
    }
}

pub fn record(
    year_film: i32,
    year_award: i32,
    category: &str,
    nominee: &str,
    film: &str,
    win: bool,
) -> AwardRecord {
    AwardRecord {
        year_film,
        year_award,
        ceremony: year_award - 1943,
        category: category.to_string(),
        nominee: nominee.to_string(),
        film: film.to_string(),
        win,
    }
}

/// The record used throughout the route tests.
pub fn jane_doe() -> AwardRecord {
    AwardRecord {
        year_film: 2015,
        year_award: 2016,
        ceremony: 73,
        category: "Best Director".to_string(),
        nominee: "Jane Doe".to_string(),
        film: "Example Film".to_string(),
        win: true,
    }
}

pub fn sample_records() -> Vec<AwardRecord> {
    vec![
        record(2014, 2015, "Best Director", "John Roe", "Earlier Film", false),
        jane_doe(),
        record(2015, 2016, "Best Director", "Max Mustermann", "Second Film", false),
        record(2015, 2016, "Best Screenplay", "Jane Doe", "Example Film", false),
        record(2016, 2017, "Best Motion Picture - Drama", "Third Film", "Third Film", true),
    ]
}

pub fn to_json(records: &[AwardRecord]) -> serde_json::Value {
    serde_json::to_value(records).unwrap()
}
