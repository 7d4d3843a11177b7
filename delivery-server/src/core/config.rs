//! Server configuration
//!
//! All settings come from environment variables with sensible defaults.

use std::time::Duration;

use crate::orders::RemainderPolicy;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 4000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | TRACKING_TICK_MS | 5000 | Interval between tracking advance steps |
/// | TRACKING_IDLE_TIMEOUT_SECS | 1800 | Idle tracking sessions older than this are evicted |
/// | EQUAL_SPLIT_REMAINDER | overcollect | overcollect \| last_payer |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Interval between automatic tracking advance steps
    pub tracking_tick_ms: u64,
    /// Idle timeout before a tracking session is evicted
    pub tracking_idle_timeout_secs: u64,
    /// Who carries the rounding surplus of ceiling-based equal splits
    pub equal_split_remainder: RemainderPolicy,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; unparseable values do too.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            tracking_tick_ms: std::env::var("TRACKING_TICK_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            tracking_idle_timeout_secs: std::env::var("TRACKING_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1800),
            equal_split_remainder: std::env::var("EQUAL_SPLIT_REMAINDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Override the port and tracking cadence, commonly for tests
    pub fn with_overrides(http_port: u16, tracking_tick_ms: u64) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.tracking_tick_ms = tracking_tick_ms;
        config
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_tick_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.tracking_idle_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
