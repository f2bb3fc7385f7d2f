//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Estimator routes
//! - Liveness endpoints
//! - JSON error responses

pub mod error;
pub mod routes;

use axum::Router;
use axum::http::Uri;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use realsync_core::TaxCalculator;
use realsync_shared::AppError;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Calculator configured with the active rate table.
    pub calculator: Arc<TaxCalculator>,
}

impl AppState {
    /// Creates state around a calculator.
    #[must_use]
    pub fn new(calculator: TaxCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(format!("No route for {uri}")).into()
}
