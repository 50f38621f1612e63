use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use lienify_api::{router, ApiConfig, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lienify_api=info".parse()?)
                .add_directive("waiver_engine=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing Lienify API...");
    let config = ApiConfig::from_env();
    let state = Arc::new(AppState::from_config(&config));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting Lienify API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
