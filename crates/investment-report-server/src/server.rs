//! Server startup and binding.

use std::future::Future;

use anyhow::{Context, Result};
use axum::Router;
use investment_report::config::Config;
use investment_report::report::ReportService;
use tokio::net::TcpListener;

use crate::routes::{build_router, AppState};

/// Configured HTTP server for the report API.
pub struct Server {
    config: Config,
    router: Router,
}

impl Server {
    /// Build a server backed by the upstream services named in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let reports =
            ReportService::from_config(&config).context("Failed to build upstream clients")?;
        Ok(Self::with_service(config, reports))
    }

    /// Build a server around an existing report service.
    pub fn with_service(config: Config, reports: ReportService) -> Self {
        let router = build_router(AppState::new(reports));
        Self { config, router }
    }

    /// Bind the configured host and port and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let host = self.config.server.host.clone();
        let port = self.config.server.port;
        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("Failed to bind {host}:{port}"))?;

        self.run_with_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener, e.g. one on port 0 in tests.
    pub async fn run_with_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server error")
    }
}
