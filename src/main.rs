//! users-api entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use users_api::api::{create_router, AppState};
use users_api::config::{Config, LogFormat};
use users_api::error::AppError;
use users_api::metrics;
use users_api::users::MySqlUserStore;
use users_api::utils::shutdown_signal;

/// Read-only JSON endpoints over a MySQL users table.
///
/// All settings come from the environment (DB_HOST, DB_PORT, DB_USER,
/// DB_PASSWORD, DB_NAME, PORT, RUST_LOG, LOG_FORMAT) or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(version, about)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();

    let config = Config::load().map_err(AppError::from)?;
    init_logging(&config);

    config.validate().map_err(AppError::InvalidConfig)?;

    run(config).await?;
    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
    }
}

async fn run(config: Config) -> users_api::Result<()> {
    let mut state = AppState::new(Arc::new(MySqlUserStore::connect_lazy(&config)));
    info!(database = %config.database_target(), user = %config.db_user, "Database pool created");

    match metrics::install_recorder() {
        Ok(handle) => {
            metrics::init_metrics();
            state = state.with_metrics(handle);
        }
        Err(e) => warn!(error = %e, "Prometheus recorder not installed, /metrics disabled"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on port {}", config.port);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
