//! Estimator routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use realsync_core::{EstimationInput, EstimationResult};
use realsync_shared::{AppError, AppResult};

/// Creates the estimator routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/estimator/calculate", post(calculate))
        .route("/estimator/uit-value", get(uit_value))
}

/// Response for the reference unit lookup.
#[derive(Debug, Serialize)]
pub struct UitValueResponse {
    /// Tax year of the active rate table.
    pub year: i32,
    /// Value of one UIT.
    pub uit_value_pen: Decimal,
    /// Currency of the value.
    pub currency: String,
    /// Explanation for display.
    pub note: &'static str,
}

/// Rejects input the calculator must never see.
fn validate_input(input: &EstimationInput) -> AppResult<()> {
    if input.sale_price <= Decimal::ZERO {
        return Err(AppError::Validation(
            "sale_price must be greater than 0".to_string(),
        ));
    }
    if input.municipality.trim().is_empty() {
        return Err(AppError::Validation(
            "municipality is required".to_string(),
        ));
    }
    if input.acquisition_price.is_some_and(|price| price <= Decimal::ZERO) {
        return Err(AppError::Validation(
            "acquisition_price must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// POST `/estimator/calculate` - Estimate taxes, fees and net profit for a sale.
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<EstimationInput>, JsonRejection>,
) -> Result<Json<EstimationResult>, ApiError> {
    let Json(input) = payload.inspect_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed estimation request");
    })?;
    validate_input(&input).inspect_err(|e| warn!(error = %e, "Invalid estimation request"))?;

    let run_id = Uuid::now_v7();
    let mut result = state.calculator.calculate(&input).inspect_err(|e| {
        error!(error = %e, %run_id, sale_price = %input.sale_price, "Estimation failed");
    })?;
    result.estimator_run_id = Some(run_id);

    info!(
        %run_id,
        municipality = %input.municipality,
        sale_price = %input.sale_price,
        total_deductions = %result.total_deductions,
        net_profit = %result.net_profit,
        "Estimation completed"
    );

    Ok(Json(result))
}

/// GET `/estimator/uit-value` - Current reference unit value.
async fn uit_value(State(state): State<AppState>) -> Json<UitValueResponse> {
    let rates = state.calculator.rates();
    Json(UitValueResponse {
        year: rates.tax_year,
        uit_value_pen: rates.uit_value,
        currency: rates.currency.clone(),
        note: "UIT (Unidad Impositiva Tributaria) is updated annually by SUNAT",
    })
}
