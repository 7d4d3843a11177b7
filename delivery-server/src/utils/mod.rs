//! Cross-cutting utilities: error handling, logging, time.

pub mod error;
pub mod logger;
pub mod time;

// Re-exports
pub use error::{AppError, AppResult};
pub use logger::init_logger;
pub use time::now_millis;
