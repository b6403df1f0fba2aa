//! Bazaar marketplace API
//!
//! Serves the user, admin and superadmin trust domains from one process, each
//! under its own path prefix and signing key.

mod config;
mod error;
mod extractors;
mod handlers;
mod operations;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use bazaar_auth_core::{AuthService, LoginAudit};
use bazaar_db::{create_pool_with_options, Repositories};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Bazaar marketplace API");

    let config = Config::from_env()?;

    // Database
    let pool = create_pool_with_options(&config.database_url, config.pool.clone()).await?;
    let repos = Repositories::new(pool.clone());

    let auth = AuthService::new(
        config.auth.clone(),
        Arc::new(repos.users),
        Arc::new(repos.superadmins),
        Arc::new(repos.stores),
        LoginAudit::new(Arc::new(repos.audit)),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(auth, pool);
    let app = routes::build_router(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
