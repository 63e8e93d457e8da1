use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sf_asset_api::config::{DatabaseConfig, EnvironmentConfig};
use sf_asset_api::database::DatabaseConnection;
use sf_asset_api::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EnvironmentConfig::from_env().context("invalid environment configuration")?;
    let db_config = DatabaseConfig::from_env().context("invalid database configuration")?;

    info!(
        environment = %config.environment,
        schema = %config.schema.version,
        asset_table = %config.schema.asset_table,
        "Starting SF Asset API"
    );

    let database = DatabaseConnection::connect(&db_config)
        .await
        .context("could not connect to the database")?;

    if config.create_tables {
        database
            .ensure_schema(&config.schema)
            .await
            .context("could not create tables")?;
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.server_url()))?;

    let state = AppState::with_pool(database.pool().clone(), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!("Server error: {}", e);
    }

    database.close().await;
    info!("Server stopped");

    served.map_err(Into::into)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
