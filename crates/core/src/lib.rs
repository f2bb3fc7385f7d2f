//! Core business logic for the RealSync estimator.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, rate tables, and calculations live here.
//!
//! # Modules
//!
//! - `estimator` - Taxes, fees and net profit for a property sale

pub mod estimator;

pub use estimator::{EstimationInput, EstimationResult, EstimatorError, RateTable, TaxCalculator};
