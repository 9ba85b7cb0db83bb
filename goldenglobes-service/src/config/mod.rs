use serde::Deserialize;
use service_core::config::{self as core_config, env_flag};
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost/project-mongo";
pub const DEFAULT_DATABASE: &str = "project-mongo";
const DEFAULT_PROBE_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenGlobesConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub store: StoreConfig,
    pub mongodb: MongoConfig,
    pub seed: SeedConfig,
    pub readiness: ReadinessConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    MongoDb,
    /// Process-local records, lost on exit. Combine with `RESET_DB` to serve
    /// the bundled dataset without a database.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    /// Falls back to the database named in `uri`, then [`DEFAULT_DATABASE`].
    pub database: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Drop every award record and load the bundled dataset at startup.
    pub reset: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessConfig {
    pub probe_interval_secs: u64,
}

impl ReadinessConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}

impl GoldenGlobesConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(GoldenGlobesConfig {
            common: common_config,
            store: StoreConfig {
                backend: env::var("STORE_BACKEND")
                    .unwrap_or_else(|_| "mongodb".to_string())
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
            mongodb: MongoConfig {
                uri: env::var("MONGO_URL").unwrap_or_else(|_| DEFAULT_MONGO_URL.to_string()),
                database: env::var("MONGO_DATABASE").ok().filter(|v| !v.is_empty()),
            },
            seed: SeedConfig {
                reset: env_flag("RESET_DB"),
            },
            readiness: ReadinessConfig {
                probe_interval_secs: parse_interval(env::var("STORE_PROBE_INTERVAL_SECS").ok())?,
            },
        })
    }
}

fn parse_interval(raw: Option<String>) -> Result<u64, AppError> {
    match raw {
        None => Ok(DEFAULT_PROBE_INTERVAL_SECS),
        Some(value) => value.trim().parse().map_err(|_| {
            AppError::ConfigError(anyhow::anyhow!(
                "STORE_PROBE_INTERVAL_SECS must be a whole number of seconds, got {:?}",
                value
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_names() {
        assert_eq!("mongodb".parse(), Ok(StoreBackend::MongoDb));
        assert_eq!("Memory".parse(), Ok(StoreBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn interval_defaults_when_unset() {
        assert_eq!(parse_interval(None).unwrap(), DEFAULT_PROBE_INTERVAL_SECS);
    }

    #[test]
    fn interval_rejects_garbage() {
        assert!(matches!(
            parse_interval(Some("soon".to_string())),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn probe_interval_is_never_zero() {
        let readiness = ReadinessConfig {
            probe_interval_secs: 0,
        };
        assert_eq!(readiness.probe_interval(), Duration::from_secs(1));
    }
}
