//! Shared errors and configuration for the RealSync estimator.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management, including tax rate overrides

pub mod config;
pub mod error;

pub use config::{AppConfig, RateOverrides, ServerConfig};
pub use error::{AppError, AppResult};
