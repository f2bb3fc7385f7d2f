//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Overrides applied on top of the built-in rate table.
    #[serde(default)]
    pub rates: RateOverrides,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Per-field overrides for the tax rate table.
///
/// Every field is optional; `None` keeps the built-in value. Rates are
/// fractions (`0.03` for 3%), base fees and the UIT value are in currency
/// units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateOverrides {
    /// Tax year the table applies to.
    pub tax_year: Option<i32>,
    /// ISO 4217 currency code used in notes.
    pub currency: Option<String>,
    /// Value of one reference unit (UIT).
    pub uit_value: Option<Decimal>,
    /// Transfer tax (Alcabala) rate.
    pub transfer_tax_rate: Option<Decimal>,
    /// Number of UIT exempt from transfer tax.
    pub transfer_tax_exemption_units: Option<Decimal>,
    /// Capital gains tax rate.
    pub capital_gains_rate: Option<Decimal>,
    /// Number of UIT of gain exempt for a primary residence.
    pub residence_exemption_units: Option<Decimal>,
    /// Fraction of the sale price assumed as acquisition cost when unknown.
    pub assumed_acquisition_ratio: Option<Decimal>,
    /// Agent commission rate.
    pub commission_rate: Option<Decimal>,
    /// Fixed notary fee.
    pub notary_base_fee: Option<Decimal>,
    /// Notary fee rate on the sale price.
    pub notary_rate: Option<Decimal>,
    /// Fixed registry (SUNARP) fee.
    pub registry_base_fee: Option<Decimal>,
    /// Registry fee rate on the sale price.
    pub registry_rate: Option<Decimal>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REALSYNC").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
