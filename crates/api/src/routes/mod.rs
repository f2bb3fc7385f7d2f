//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod estimator;
pub mod health;

/// Creates the versioned API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(estimator::routes())
}
