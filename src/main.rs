use std::sync::Arc;

use member_graph::api;
use member_graph::app_state::AppState;
use member_graph::config::{Config, StoreKind};
use member_graph::db::pool::get_db_pool;
use member_graph::db::{MemoryStore, PgStore, SharedStore};
use member_graph::logging::init_tracing;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Config::init()?;
    let config = Config::get();
    let _log_guard = init_tracing(&config)?;

    let (store, pool): (SharedStore, Option<PgPool>) = match config.data_store {
        StoreKind::Postgres => {
            let pool = get_db_pool(&config).await?;
            (Arc::new(PgStore::new(pool.clone())), Some(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory data store; nothing will be persisted");
            (Arc::new(MemoryStore::new()), None)
        }
    };

    if config.run_migrations {
        store.migrate().await?;
    }

    // Schema is built here once and shared by every request.
    let state = AppState::new(store, config.clone());
    let app = api::app(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(pool))
        .await?;

    tracing::info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal(pool: Option<PgPool>) {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
    }
    tracing::info!("Received Ctrl+C, shutting down...");

    if let Some(pool) = pool {
        tracing::info!("Closing database pool...");
        pool.close().await;
        tracing::info!("Database pool closed.");
    }
}
