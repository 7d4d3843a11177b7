//! Server state
//!
//! [`ServerState`] holds shared references to the order store and the
//! tracking feed. It is cheap to clone (Arc all the way down) and is the
//! axum state for every handler, so neither registry is ever ambient
//! global state.

use std::sync::Arc;
use std::time::Duration;

use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::orders::OrderStore;
use crate::tracking::{TrackingConfig, TrackingFeed};

/// Interval of the idle-session sweep
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration (immutable)
    pub config: Config,
    /// Order persistence boundary
    pub orders: Arc<OrderStore>,
    /// Live tracking session registry
    pub tracking: Arc<TrackingFeed>,
}

impl ServerState {
    pub fn initialize(config: &Config) -> Self {
        let orders = Arc::new(OrderStore::new(config.equal_split_remainder));
        let tracking = Arc::new(TrackingFeed::new(TrackingConfig {
            tick_interval: config.tick_interval(),
            idle_timeout: config.idle_timeout(),
        }));
        Self {
            config: config.clone(),
            orders,
            tracking,
        }
    }

    /// Register the periodic jobs this state needs
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let feed = self.tracking.clone();
        let shutdown = tasks.shutdown_token();
        tasks.spawn("tracking_idle_sweep", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = interval.tick() => {
                        let evicted = feed.evict_idle();
                        if evicted > 0 {
                            tracing::debug!(evicted, "Idle tracking sessions swept");
                        }
                    }
                }
            }
        });
    }
}
