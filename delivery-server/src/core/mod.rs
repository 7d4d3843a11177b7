//! Core server plumbing: configuration, shared state, HTTP runner, and
//! background-task management.

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

// Re-exports
pub use config::Config;
pub use server::Server;
pub use state::ServerState;
pub use tasks::{BackgroundTasks, TaskKind};
