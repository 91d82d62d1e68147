// Numerology Engine - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use numerology_engine::api::{router, AppState};
use numerology_engine::{setup_database, ChartCalculator, EngineConfig};
use rusqlite::Connection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::load(None)?;
    let interpretations = config.interpretation_table()?;

    let conn = Connection::open(&config.database_path)
        .with_context(|| format!("Failed to open database: {:?}", config.database_path))?;
    setup_database(&conn)?;
    tracing::info!(path = ?config.database_path, "database opened");

    let state = AppState::new(conn, ChartCalculator::new(config.chart_options()), interpretations);

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server_addr))?;

    tracing::info!(
        addr = %config.server_addr,
        forecast_year = config.forecast_year,
        "server running"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
