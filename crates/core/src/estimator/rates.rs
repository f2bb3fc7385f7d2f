//! Tax year rate table.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use realsync_shared::RateOverrides;

use super::error::EstimatorError;
use super::rules::checked_mul;

/// Rates, thresholds and fixed fees for a single tax year.
///
/// Rates are fractions (`0.03` is 3%). Exemption thresholds are expressed in
/// multiples of the reference unit (`uit_value`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Tax year the values were published for.
    pub tax_year: i32,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Value of one UIT (Unidad Impositiva Tributaria).
    pub uit_value: Decimal,
    /// Alcabala rate on the sale price above the exemption.
    pub transfer_tax_rate: Decimal,
    /// UIT count exempt from Alcabala.
    pub transfer_tax_exemption_units: Decimal,
    /// Capital gains tax rate.
    pub capital_gains_rate: Decimal,
    /// UIT count of gain exempt for a primary residence.
    pub residence_exemption_units: Decimal,
    /// Share of the sale price assumed as acquisition cost when none is given.
    pub assumed_acquisition_ratio: Decimal,
    /// Agent commission rate.
    pub commission_rate: Decimal,
    /// Fixed notary fee.
    pub notary_base_fee: Decimal,
    /// Notary rate on the sale price.
    pub notary_rate: Decimal,
    /// Fixed SUNARP registry fee.
    pub registry_base_fee: Decimal,
    /// Registry rate on the sale price.
    pub registry_rate: Decimal,
}

impl Default for RateTable {
    /// The 2024 Peruvian rate set.
    fn default() -> Self {
        Self {
            tax_year: 2024,
            currency: "PEN".to_string(),
            uit_value: dec!(5150),
            transfer_tax_rate: dec!(0.03),
            transfer_tax_exemption_units: dec!(10),
            capital_gains_rate: dec!(0.05),
            residence_exemption_units: dec!(5),
            assumed_acquisition_ratio: dec!(0.80),
            commission_rate: dec!(0.04),
            notary_base_fee: dec!(500),
            notary_rate: dec!(0.007),
            registry_base_fee: dec!(300),
            registry_rate: dec!(0.003),
        }
    }
}

impl RateTable {
    /// Sale price at or below which no Alcabala is due.
    pub fn exemption_threshold(&self) -> Result<Decimal, EstimatorError> {
        checked_mul(
            self.uit_value,
            self.transfer_tax_exemption_units,
            "transfer tax exemption threshold",
        )
    }

    /// Largest gain still exempt for a primary residence.
    pub fn residence_exemption_limit(&self) -> Result<Decimal, EstimatorError> {
        checked_mul(
            self.uit_value,
            self.residence_exemption_units,
            "residence exemption limit",
        )
    }

    /// Returns a copy with every `Some` override applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &RateOverrides) -> Self {
        let pick = |value: Option<Decimal>, current: Decimal| value.unwrap_or(current);

        Self {
            tax_year: overrides.tax_year.unwrap_or(self.tax_year),
            currency: overrides
                .currency
                .clone()
                .unwrap_or_else(|| self.currency.clone()),
            uit_value: pick(overrides.uit_value, self.uit_value),
            transfer_tax_rate: pick(overrides.transfer_tax_rate, self.transfer_tax_rate),
            transfer_tax_exemption_units: pick(
                overrides.transfer_tax_exemption_units,
                self.transfer_tax_exemption_units,
            ),
            capital_gains_rate: pick(overrides.capital_gains_rate, self.capital_gains_rate),
            residence_exemption_units: pick(
                overrides.residence_exemption_units,
                self.residence_exemption_units,
            ),
            assumed_acquisition_ratio: pick(
                overrides.assumed_acquisition_ratio,
                self.assumed_acquisition_ratio,
            ),
            commission_rate: pick(overrides.commission_rate, self.commission_rate),
            notary_base_fee: pick(overrides.notary_base_fee, self.notary_base_fee),
            notary_rate: pick(overrides.notary_rate, self.notary_rate),
            registry_base_fee: pick(overrides.registry_base_fee, self.registry_base_fee),
            registry_rate: pick(overrides.registry_rate, self.registry_rate),
        }
    }

    /// Checks that rates are fractions in `[0, 1]` and amounts are non-negative.
    pub fn validate(&self) -> Result<(), EstimatorError> {
        if self.currency.trim().is_empty() {
            return Err(EstimatorError::InvalidRate {
                name: "currency",
                value: self.currency.clone(),
            });
        }

        let fractions = [
            ("transfer_tax_rate", self.transfer_tax_rate),
            ("capital_gains_rate", self.capital_gains_rate),
            ("assumed_acquisition_ratio", self.assumed_acquisition_ratio),
            ("commission_rate", self.commission_rate),
            ("notary_rate", self.notary_rate),
            ("registry_rate", self.registry_rate),
        ];
        if let Some((name, value)) = fractions
            .into_iter()
            .find(|(_, v)| v.is_sign_negative() || *v > Decimal::ONE)
        {
            return Err(EstimatorError::invalid(name, value));
        }

        let amounts = [
            ("uit_value", self.uit_value),
            ("transfer_tax_exemption_units", self.transfer_tax_exemption_units),
            ("residence_exemption_units", self.residence_exemption_units),
            ("notary_base_fee", self.notary_base_fee),
            ("registry_base_fee", self.registry_base_fee),
        ];
        if let Some((name, value)) = amounts.into_iter().find(|(_, v)| v.is_sign_negative()) {
            return Err(EstimatorError::invalid(name, value));
        }

        Ok(())
    }
}

/// Expresses a fractional rate as a percentage (`0.03` becomes `3`).
pub fn as_percent(rate: Decimal) -> Result<Decimal, EstimatorError> {
    checked_mul(rate, Decimal::ONE_HUNDRED, "rate percentage").map(|p| p.normalize())
}
