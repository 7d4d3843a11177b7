//! Shared types for the delivery platform
//!
//! Common types used across the server and its clients: the order model
//! with split-bill support, and the live tracking payloads.

pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use types::Timestamp;
