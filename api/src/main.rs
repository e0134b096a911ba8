use anyhow::Result;
use axum::{routing::get, Router};
use marketpulse_rs::config::Config;
use marketpulse_rs::fetch::YahooClient;
use tower_http::trace::TraceLayer;
use tracing::info;

mod handlers;

use handlers::{dashboard, export_csv, health_check, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting MarketPulse dashboard server...");

    let config = Config::from_env()?;
    let client = YahooClient::new(&config)?;

    let app = Router::new()
        .route("/", get(dashboard))
        .route("/export", get(export_csv))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { client });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Dashboard listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
