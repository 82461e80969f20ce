//! Serve command - run the HTTP service.

use crate::app::App;
use crate::http;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use zookeepr_core::Config;

/// Run the serve command until interrupted.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = App::new(config)?;
    let router = http::router(app.store.clone(), &app.config.pages.public_dir);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        addr = %addr,
        animals = app.store.len(),
        public_dir = %app.config.pages.public_dir.display(),
        "API server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
