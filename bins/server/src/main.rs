//! RealSync Estimator Server
//!
//! Main entry point for the tax estimator service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use realsync_api::{AppState, create_router};
use realsync_core::{RateTable, TaxCalculator};
use realsync_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "realsync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Build the rate table
    let rates = RateTable::default().with_overrides(&config.rates);
    rates.validate()?;
    info!(
        tax_year = rates.tax_year,
        uit_value = %rates.uit_value,
        currency = %rates.currency,
        "Rate table loaded"
    );

    // Create application state
    let state = AppState::new(TaxCalculator::new(rates));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
