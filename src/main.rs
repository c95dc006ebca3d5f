//! Server binary: reads config, prepares the store, mounts the API and docs.

use std::sync::Arc;
use ticket_api::{app, ensure_database_exists, ensure_tables, AppState, MemoryStore, PgStore, ServerConfig, Store};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ticket_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_tables(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let router = app(AppState::new(store), config.body_limit);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Server on port: {}", addr.port());
    tracing::info!("Version 1 Docs are available at http://{}/api/v1/docs", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
