use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use vitals_server::config::{LogFormat, ServiceConfig};
use vitals_server::state::AppState;
use vitals_storage::file::JsonFileStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);

    let store = JsonFileStore::new(&config.store_path);
    if config.create_store {
        store.create_if_missing()?;
    }

    let app = vitals_server::router(AppState::new(Arc::new(store)));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| eyre::eyre!("failed to bind {}: {e}", config.bind_addr))?;
    tracing::info!(
        addr = %config.bind_addr,
        store = %config.store_path.display(),
        "vitals server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("vitals server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init(),
    }
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}
