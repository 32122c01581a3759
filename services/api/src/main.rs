mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod rate_limit;
mod registry;
mod router;
mod state;

use config::ApiConfig;
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting LinkShorti API service");

    let config = ApiConfig::from_env()?;
    let addr = config.bind_addr;
    let state = AppState::new(config);

    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
