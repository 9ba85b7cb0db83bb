use crate::models::{AwardFilter, AwardRecord};
use crate::services::{ConnectionState, StoreReadiness};
use async_trait::async_trait;
use service_core::error::AppError;

/// Outcome of replacing the store contents with a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub deleted: u64,
    pub inserted: u64,
    pub failed: u64,
}

/// Read access to award records plus the one-shot reseed.
///
/// Every read returns records in insertion order.
#[async_trait]
pub trait AwardStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<AwardRecord>, AppError>;

    async fn find_by(&self, filter: &AwardFilter) -> Result<Vec<AwardRecord>, AppError>;

    async fn find_one_by(&self, filter: &AwardFilter) -> Result<Option<AwardRecord>, AppError>;

    /// Delete every record, then insert `records` in order. Individual insert
    /// failures are counted in the report rather than aborting the batch.
    async fn reseed(&self, records: Vec<AwardRecord>) -> Result<SeedReport, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    fn readiness(&self) -> &StoreReadiness;

    fn connection_state(&self) -> ConnectionState {
        self.readiness().get()
    }
}
