//! Reunite Server — case-management auth and real-time notification core.
//!
//! Main entry point that loads configuration, prepares the database, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use reunite_core::config::AppConfig;
use reunite_core::error::AppError;
use reunite_database::connection::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
///
/// Validation happens here, before any subsystem starts: a missing signing
/// key or token lifetime kills the process instead of surfacing later as
/// per-request failures.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("REUNITE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Reunite v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    reunite_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Serve until shutdown ─────────────────────────────
    let result = reunite_api::run_server(config, db.clone()).await;

    db.close().await;

    tracing::info!("Reunite server shut down");
    result
}
