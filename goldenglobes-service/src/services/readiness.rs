//! Store connection readiness, shared between the store, its monitor and the
//! availability gate.

use crate::services::{metrics, AwardStore};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
}

impl ConnectionState {
    pub fn is_ready(self) -> bool {
        self == ConnectionState::Connected
    }

    fn as_u8(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connected => 1,
            ConnectionState::Connecting => 2,
            ConnectionState::Disconnecting => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connected,
            2 => ConnectionState::Connecting,
            3 => ConnectionState::Disconnecting,
            _ => ConnectionState::Disconnected,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Disconnecting => write!(f, "disconnecting"),
        }
    }
}

/// Cloneable handle to the current [`ConnectionState`].
#[derive(Debug, Clone)]
pub struct StoreReadiness {
    state: Arc<AtomicU8>,
}

impl StoreReadiness {
    pub fn new(initial: ConnectionState) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(initial.as_u8())),
        }
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Returns the previous state.
    pub fn set(&self, next: ConnectionState) -> ConnectionState {
        let previous = ConnectionState::from_u8(self.state.swap(next.as_u8(), Ordering::AcqRel));
        Self::record_transition(previous, next);
        previous
    }

    /// Apply the outcome of a ping.
    ///
    /// A store that is shutting down stays `Disconnecting` whatever the ping
    /// says, even when shutdown lands while the ping is in flight.
    pub fn observe_ping(&self, ok: bool) {
        let next = if ok {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };
        let disconnecting = ConnectionState::Disconnecting.as_u8();

        let updated = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current != disconnecting).then_some(next.as_u8())
            });
        if let Ok(previous) = updated {
            Self::record_transition(ConnectionState::from_u8(previous), next);
        }
    }

    fn record_transition(previous: ConnectionState, next: ConnectionState) {
        if previous != next {
            tracing::info!(from = %previous, to = %next, "Store connection state changed");
            metrics::record_store_state(next);
        }
    }
}

impl Default for StoreReadiness {
    fn default() -> Self {
        Self::new(ConnectionState::Connecting)
    }
}

/// Background task that keeps a store's readiness in sync with its
/// reachability.
pub struct ReadinessMonitor {
    handle: JoinHandle<()>,
}

impl ReadinessMonitor {
    /// Ping immediately, then every `interval`.
    pub fn spawn(store: Arc<dyn AwardStore>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = store.ping().await;
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "Store ping failed");
                }
                store.readiness().observe_ping(result.is_ok());
            }
        });

        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}
