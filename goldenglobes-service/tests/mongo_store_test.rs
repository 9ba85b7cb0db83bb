//! End-to-end tests against a real MongoDB.
//!
//! Run with `cargo test -- --ignored` and a server at `TEST_MONGODB_URI`
//! (default `mongodb://localhost:27017`).

use goldenglobes_service::config::{
    GoldenGlobesConfig, MongoConfig, ReadinessConfig, SeedConfig, StoreBackend, StoreConfig,
};
use goldenglobes_service::models::{AwardFilter, AwardRecord};
use goldenglobes_service::services::{seed, AwardStore, MongoAwardStore};
use goldenglobes_service::startup::Application;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use reqwest::{Client, StatusCode};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use uuid::Uuid;

struct MongoTestApp {
    address: String,
    store: MongoAwardStore,
}

impl MongoTestApp {
    async fn spawn(reset: bool) -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database = format!("goldenglobes_test_{}", Uuid::new_v4().simple());

        let config = GoldenGlobesConfig {
            common: CoreConfig { port: 0 },
            store: StoreConfig {
                backend: StoreBackend::MongoDb,
            },
            mongodb: MongoConfig {
                uri: uri.clone(),
                database: Some(database.clone()),
            },
            seed: SeedConfig { reset },
            readiness: ReadinessConfig {
                probe_interval_secs: 1,
            },
        };

        let store = MongoAwardStore::connect(&uri, Some(&database))
            .await
            .expect("Failed to configure MongoDB client");

        let app = Application::build_with_store(config, Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // The gate opens after the first successful ping
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if let Ok(response) = client.get(&health_url).send().await {
                if response.status().is_success() {
                    break;
                }
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        }

        MongoTestApp { address, store }
    }

    async fn cleanup(&self) {
        let _ = self.store.database().drop(None).await;
    }
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn reset_seeds_bundled_dataset() {
    let app = MongoTestApp::spawn(true).await;
    let dataset = seed::bundled_dataset().unwrap();

    let response = Client::new()
        .get(format!("{}/goldenglobes", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let records: Vec<AwardRecord> = response.json().await.expect("Failed to parse response");
    assert_eq!(records, dataset);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn reseed_twice_does_not_duplicate() {
    let app = MongoTestApp::spawn(false).await;
    let dataset = seed::bundled_dataset().unwrap();

    seed::reseed(&app.store, dataset.clone()).await.unwrap();
    let report = seed::reseed(&app.store, dataset.clone()).await.unwrap();

    assert_eq!(report.deleted, dataset.len() as u64);
    assert_eq!(report.inserted, dataset.len() as u64);
    assert_eq!(report.failed, 0);
    assert_eq!(app.store.find_all().await.unwrap().len(), dataset.len());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn numeric_path_values_match_stored_integers() {
    let app = MongoTestApp::spawn(false).await;
    let jane = AwardRecord {
        year_film: 2015,
        year_award: 2016,
        ceremony: 73,
        category: "Best Director".to_string(),
        nominee: "Jane Doe".to_string(),
        film: "Example Film".to_string(),
        win: true,
    };
    seed::reseed(&app.store, vec![jane.clone()]).await.unwrap();
    let client = Client::new();

    let response = client
        .get(format!("{}/goldenglobes/release/2015", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<AwardRecord>().await.unwrap(), jane);

    let response = client
        .get(format!("{}/goldenglobes/awardyear/2016", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Vec<AwardRecord>>().await.unwrap(),
        vec![jane.clone()]
    );

    let response = client
        .get(format!("{}/goldenglobes/release/1999", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn find_by_preserves_insertion_order() {
    let app = MongoTestApp::spawn(false).await;
    let dataset = seed::bundled_dataset().unwrap();
    seed::reseed(&app.store, dataset.clone()).await.unwrap();

    let winners = app.store.find_by(&AwardFilter::Win(true)).await.unwrap();

    let expected: Vec<_> = dataset.into_iter().filter(|r| r.win).collect();
    assert_eq!(winners, expected);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn rejected_record_does_not_stop_the_rest_of_the_seed() {
    let app = MongoTestApp::spawn(false).await;
    let unique_nominee = IndexModel::builder()
        .keys(doc! { "nominee": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    app.store
        .awards()
        .create_index(unique_nominee, None)
        .await
        .expect("Failed to create unique index");

    let dataset: Vec<AwardRecord> = seed::bundled_dataset()
        .unwrap()
        .into_iter()
        .filter(|r| r.year_award == 2020)
        .fold(Vec::new(), |mut unique, record| {
            if !unique.iter().any(|r: &AwardRecord| r.nominee == record.nominee) {
                unique.push(record);
            }
            unique
        });
    assert!(dataset.len() >= 3);

    let mut duplicate = dataset[0].clone();
    duplicate.category = "Duplicate Nominee".to_string();
    let mut with_duplicate = dataset.clone();
    with_duplicate.insert(dataset.len() / 2, duplicate);

    let report = seed::reseed(&app.store, with_duplicate.clone())
        .await
        .expect("Reseed should succeed despite a rejected record");

    assert_eq!(report.failed, 1);
    assert_eq!(report.inserted, with_duplicate.len() as u64 - 1);
    assert_eq!(app.store.find_all().await.unwrap(), dataset);

    app.cleanup().await;
}
