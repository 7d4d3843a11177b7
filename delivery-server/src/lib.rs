//! Delivery server
//!
//! Food-ordering backend core: the order lifecycle with split-bill
//! computation, and the live delivery tracking feed.
//!
//! # Modules
//!
//! - [`core`] - configuration, shared state, HTTP runner, background tasks
//! - [`orders`] - money helpers, the recompute engine, the order store
//! - [`tracking`] - geo math, movement sources, sessions, the feed registry
//! - [`api`] - axum handlers
//! - [`utils`] - errors, logging, time

pub mod api;
pub mod core;
pub mod orders;
pub mod tracking;
pub mod utils;

// Re-exports
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

/// Load .env and initialize logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
