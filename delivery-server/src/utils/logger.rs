//! Logging Infrastructure
//!
//! tracing setup: env-filter driven level selection, optional daily
//! rolling file output for production deployments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with stdout output only
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger
///
/// `RUST_LOG` wins when set; otherwise `log_level` (default `info`).
/// When `log_dir` points at an existing directory, output goes to a
/// daily-rolling file there instead of stdout.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if let Some(dir) = log_dir
        && Path::new(dir).exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "delivery-server");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
