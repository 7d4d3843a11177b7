//! Server Implementation
//!
//! HTTP server startup and graceful shutdown.

use std::net::SocketAddr;

use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };

        let mut tasks = BackgroundTasks::new();
        state.start_background_tasks(&mut tasks);

        let app = crate::api::router(state.clone());
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Delivery server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        // Stop tick loops first so no task publishes into a closing process
        state.tracking.shutdown();
        tasks.shutdown().await;

        Ok(())
    }
}
