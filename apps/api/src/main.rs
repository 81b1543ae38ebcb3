mod admin;
mod auth;
mod candidates;
mod config;
mod db;
mod errors;
mod extract;
mod jobs;
mod models;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::seed::seed_admin;
use crate::auth::JwtManager;
use crate::candidates::storage::ResumeStorage;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::store::{PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireWire API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(db));

    seed_admin(store.as_ref(), &config).await?;

    let storage = ResumeStorage::new(config.upload_dir(), config.secondary_upload_dir());
    info!("Resume uploads stored in {}", storage.primary_dir().display());

    let state = AppState {
        store,
        jwt: JwtManager::new(config.jwt_secret.as_bytes(), config.jwt_ttl_secs),
        storage,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
