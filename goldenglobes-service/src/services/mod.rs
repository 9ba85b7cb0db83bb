pub mod database;
pub mod memory;
pub mod metrics;
pub mod readiness;
pub mod seed;
pub mod store;

pub use database::MongoAwardStore;
pub use memory::InMemoryAwardStore;
pub use self::metrics::{get_metrics, init_metrics};
pub use readiness::{ConnectionState, ReadinessMonitor, StoreReadiness};
pub use store::{AwardStore, SeedReport};
