//! Estimator error types.

use rust_decimal::Decimal;
use thiserror::Error;

use realsync_shared::AppError;

/// Estimator-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// Decimal arithmetic overflowed.
    #[error("Arithmetic overflow while computing {step}")]
    Overflow {
        /// Computation step that overflowed.
        step: &'static str,
    },

    /// A rate table entry is out of range.
    #[error("Invalid rate table entry {name}: {value}")]
    InvalidRate {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

impl EstimatorError {
    pub(crate) fn invalid(name: &'static str, value: Decimal) -> Self {
        Self::InvalidRate {
            name,
            value: value.to_string(),
        }
    }
}

impl From<EstimatorError> for AppError {
    fn from(err: EstimatorError) -> Self {
        Self::Internal(format!("Estimation failed: {err}"))
    }
}
