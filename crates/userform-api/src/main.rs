// Userform API server
// Decision: The users table is created before the listener is bound; if that
// fails the process exits without serving

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userform_api::{AppState, ServerConfig, Templates};
use userform_core::UserStore;
use userform_storage::{Database, DatabaseConfig, PgUserStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userform_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("userform-api starting...");

    let server_config = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    // Initialize database
    let db = Database::connect(&db_config)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let store = Arc::new(PgUserStore::new(db));
    store
        .initialize()
        .await
        .context("Failed to create users table")?;
    tracing::info!("users table ready");

    let templates = Templates::from_dir(&server_config.template_dir);
    tracing::info!(dir = %server_config.template_dir.display(), "Templates configured");

    let app = userform_api::app(AppState::new(store, templates));

    // Start server
    let addr = server_config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
