//! In-process award store for tests and database-less local runs.

use crate::models::{AwardFilter, AwardRecord};
use crate::services::{AwardStore, ConnectionState, SeedReport, StoreReadiness};
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub struct InMemoryAwardStore {
    records: RwLock<Vec<AwardRecord>>,
    readiness: StoreReadiness,
    reachable: AtomicBool,
}

impl InMemoryAwardStore {
    /// An empty store that is already connected.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<AwardRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            readiness: StoreReadiness::new(ConnectionState::Connected),
            reachable: AtomicBool::new(true),
        }
    }

    /// Make subsequent queries and pings fail, as a dropped connection would.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::Release);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_reachable(&self) -> Result<(), AppError> {
        if self.reachable.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!(
                "in-memory store is unreachable"
            )))
        }
    }
}

impl Default for InMemoryAwardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AwardStore for InMemoryAwardStore {
    async fn find_all(&self) -> Result<Vec<AwardRecord>, AppError> {
        self.check_reachable()?;
        Ok(self.records.read().await.clone())
    }

    async fn find_by(&self, filter: &AwardFilter) -> Result<Vec<AwardRecord>, AppError> {
        self.check_reachable()?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_one_by(&self, filter: &AwardFilter) -> Result<Option<AwardRecord>, AppError> {
        self.check_reachable()?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| filter.matches(r))
            .cloned())
    }

    async fn reseed(&self, records: Vec<AwardRecord>) -> Result<SeedReport, AppError> {
        self.check_reachable()?;
        let mut stored = self.records.write().await;
        let deleted = stored.len() as u64;
        let inserted = records.len() as u64;
        *stored = records;
        Ok(SeedReport {
            deleted,
            inserted,
            failed: 0,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_reachable()
    }

    fn readiness(&self) -> &StoreReadiness {
        &self.readiness
    }
}
