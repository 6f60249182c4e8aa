use anyhow::Result;
use portfolio_server::{create_app, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // A missing .env file is normal in containers.
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();
    info!("Starting portfolio server v{}...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;
    let app = create_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
