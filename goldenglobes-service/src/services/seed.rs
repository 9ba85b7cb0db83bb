//! Startup reset of the award collection from the bundled dataset.

use crate::models::AwardRecord;
use crate::services::{metrics, AwardStore, SeedReport};
use service_core::error::AppError;

const BUNDLED_DATASET: &str = include_str!("../../data/golden-globes.json");

/// Parse the dataset compiled into the binary.
pub fn bundled_dataset() -> Result<Vec<AwardRecord>, AppError> {
    parse_dataset(BUNDLED_DATASET)
}

pub fn parse_dataset(json: &str) -> Result<Vec<AwardRecord>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Replace the store contents with `dataset`, awaiting every insert.
pub async fn reseed(
    store: &dyn AwardStore,
    dataset: Vec<AwardRecord>,
) -> Result<SeedReport, AppError> {
    let expected = dataset.len();
    tracing::info!(records = expected, "Resetting award records");

    let report = store.reseed(dataset).await.map_err(|e| {
        tracing::error!("Seeding award records failed: {}", e);
        e
    })?;

    metrics::record_seed(&report);

    if report.failed > 0 {
        tracing::warn!(
            deleted = report.deleted,
            inserted = report.inserted,
            failed = report.failed,
            "Award records seeded with failures"
        );
    } else {
        tracing::info!(
            deleted = report.deleted,
            inserted = report.inserted,
            "Award records seeded"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryAwardStore;

    #[test]
    fn bundled_dataset_parses() {
        let dataset = bundled_dataset().expect("Bundled dataset is invalid");
        assert!(!dataset.is_empty());
        assert!(dataset.iter().any(|r| r.win));
        assert!(dataset.iter().any(|r| !r.win));
    }

    #[test]
    fn rejects_records_with_missing_fields() {
        let result = parse_dataset(r#"[{"year_film": 2015, "nominee": "Jane Doe"}]"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn reseed_loads_every_entry_in_order() {
        let store = InMemoryAwardStore::new();
        let dataset = bundled_dataset().unwrap();

        let report = reseed(&store, dataset.clone()).await.unwrap();

        assert_eq!(report.inserted, dataset.len() as u64);
        assert_eq!(store.find_all().await.unwrap(), dataset);
    }

    #[tokio::test]
    async fn reseed_surfaces_store_failure() {
        let store = InMemoryAwardStore::new();
        store.set_reachable(false);

        assert!(reseed(&store, bundled_dataset().unwrap()).await.is_err());
    }
}
