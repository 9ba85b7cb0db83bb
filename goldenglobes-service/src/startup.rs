//! Application startup and lifecycle management.

use crate::config::{GoldenGlobesConfig, StoreBackend};
use crate::handlers;
use crate::middleware::availability_gate;
use crate::services::{
    seed, AwardStore, ConnectionState, InMemoryAwardStore, MongoAwardStore, ReadinessMonitor,
};
use axum::{
    body::Body,
    extract::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router, ServiceExt,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AwardStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AwardStore>) -> Self {
        Self { store }
    }
}

/// Build the HTTP router.
///
/// Everything except `/metrics` sits behind the availability gate, including
/// the fallback for unknown paths.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::endpoint_catalog))
        .route("/health", get(handlers::health_check))
        .route("/goldenglobes", get(handlers::list_awards))
        .route(
            "/goldenglobes/awardyear/:year_award",
            get(handlers::awards_by_year),
        )
        .route("/goldenglobes/films/:film", get(handlers::awards_by_film))
        .route(
            "/goldenglobes/nominees/:nominee",
            get(handlers::awards_by_nominee),
        )
        .route("/goldenglobes/winners/:win", get(handlers::awards_by_win))
        .route(
            "/goldenglobes/release/:year_film",
            get(handlers::release_by_year),
        )
        .layer(from_fn_with_state(state.clone(), availability_gate))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wrap the router so `/goldenglobes/` and `/goldenglobes` resolve to the
/// same route. Trailing slashes are trimmed before routing, which a layer
/// on the [`Router`] itself cannot do.
pub fn build_service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
    config: GoldenGlobesConfig,
}

impl Application {
    /// Build the application with the store selected by the configuration.
    pub async fn build(config: GoldenGlobesConfig) -> Result<Self, AppError> {
        let store: Arc<dyn AwardStore> = match config.store.backend {
            StoreBackend::MongoDb => Arc::new(
                MongoAwardStore::connect(&config.mongodb.uri, config.mongodb.database.as_deref())
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to configure MongoDB client: {}", e);
                        e
                    })?,
            ),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory award store, records are not persisted");
                Arc::new(InMemoryAwardStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Build the application around an existing store, reseeding it first
    /// when the configuration asks for a reset.
    pub async fn build_with_store(
        config: GoldenGlobesConfig,
        store: Arc<dyn AwardStore>,
    ) -> Result<Self, AppError> {
        if config.seed.reset {
            let dataset = seed::bundled_dataset()?;
            seed::reseed(store.as_ref(), dataset).await?;
        }

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state: AppState::new(store),
            config,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn AwardStore> {
        self.state.store.clone()
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let store = self.state.store.clone();
        let monitor =
            ReadinessMonitor::spawn(store.clone(), self.config.readiness.probe_interval());

        let service = build_service(self.state);

        tracing::info!("Server running on http://localhost:{}", self.port);

        let result = axum::serve(
            self.listener,
            ServiceExt::<Request>::into_make_service(service),
        )
            .with_graceful_shutdown(shutdown_signal(store))
            .await;

        monitor.stop();
        result
    }
}

async fn shutdown_signal(store: Arc<dyn AwardStore>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    store.readiness().set(ConnectionState::Disconnecting);
}
