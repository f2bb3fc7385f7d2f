//! Real-estate sale tax and fee estimation.
//!
//! Covers the Peruvian Alcabala (transfer tax), Impuesto a la Renta
//! (capital gains), agent commission, notary fees and SUNARP registry fees.

pub mod calculator;
pub mod error;
pub mod rates;
pub mod rules;
pub mod types;


pub use calculator::{DISCLAIMER, TaxCalculator};
pub use error::EstimatorError;
pub use rates::RateTable;
pub use types::{EstimationInput, EstimationResult, LineItem, RuleOutcome};
