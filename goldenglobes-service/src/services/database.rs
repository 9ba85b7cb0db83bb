use crate::config::DEFAULT_DATABASE;
use crate::models::{AwardFilter, AwardRecord};
use crate::services::{AwardStore, SeedReport, StoreReadiness};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::ErrorKind,
    options::{ClientOptions, FindOneOptions, FindOptions, InsertManyOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

pub const AWARDS_COLLECTION: &str = "goldenglobes";

/// Upper bound for a single server selection, so an unreachable store is
/// reported within one probe instead of the driver's 30 second default.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct MongoAwardStore {
    client: MongoClient,
    db: Database,
    readiness: StoreReadiness,
}

impl MongoAwardStore {
    /// Build a client for `uri`. The driver connects lazily, so this only
    /// fails on a malformed URI; reachability is tracked by
    /// [`StoreReadiness`].
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("goldenglobes-service".to_string());
        if options.server_selection_timeout.is_none() {
            options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        }

        let client = MongoClient::with_options(options)?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        tracing::info!(database = %db.name(), "MongoDB client configured");

        Ok(Self {
            client,
            db,
            readiness: StoreReadiness::default(),
        })
    }

    pub fn awards(&self) -> Collection<AwardRecord> {
        self.db.collection(AWARDS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn insertion_order() -> Document {
        doc! { "_id": 1 }
    }
}

#[async_trait]
impl AwardStore for MongoAwardStore {
    async fn find_all(&self) -> Result<Vec<AwardRecord>, AppError> {
        let options = FindOptions::builder()
            .sort(Self::insertion_order())
            .build();

        let cursor = self.awards().find(doc! {}, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by(&self, filter: &AwardFilter) -> Result<Vec<AwardRecord>, AppError> {
        let options = FindOptions::builder()
            .sort(Self::insertion_order())
            .build();

        let cursor = self.awards().find(filter.to_document(), options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one_by(&self, filter: &AwardFilter) -> Result<Option<AwardRecord>, AppError> {
        let options = FindOneOptions::builder()
            .sort(Self::insertion_order())
            .build();

        Ok(self.awards().find_one(filter.to_document(), options).await?)
    }

    async fn reseed(&self, records: Vec<AwardRecord>) -> Result<SeedReport, AppError> {
        let deleted = self
            .awards()
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear award records: {}", e);
                AppError::from(e)
            })?
            .deleted_count;

        if records.is_empty() {
            return Ok(SeedReport {
                deleted,
                inserted: 0,
                failed: 0,
            });
        }

        let total = records.len() as u64;
        // Unordered: a rejected document does not stop the ones after it.
        let options = InsertManyOptions::builder().ordered(false).build();

        match self.awards().insert_many(&records, options).await {
            Ok(result) => Ok(SeedReport {
                deleted,
                inserted: result.inserted_ids.len() as u64,
                failed: 0,
            }),
            Err(e) => match e.kind.as_ref() {
                ErrorKind::BulkWrite(failure) if failure.write_errors.is_some() => {
                    let write_errors = failure.write_errors.as_deref().unwrap_or_default();
                    for write_error in write_errors {
                        tracing::warn!(
                            index = write_error.index,
                            code = write_error.code,
                            "Failed to insert award record: {}",
                            write_error.message
                        );
                    }
                    let failed = write_errors.len() as u64;
                    Ok(SeedReport {
                        deleted,
                        inserted: total.saturating_sub(failed),
                        failed,
                    })
                }
                _ => {
                    tracing::error!("Failed to insert award records: {}", e);
                    Err(AppError::from(e))
                }
            },
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    fn readiness(&self) -> &StoreReadiness {
        &self.readiness
    }
}
