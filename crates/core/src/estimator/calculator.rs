//! Estimation pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::EstimatorError;
use super::rates::{RateTable, as_percent};
use super::rules::{self, checked_add, checked_sub};
use super::types::{EstimationInput, EstimationResult, LineItem};

/// Disclaimer attached to every estimate.
pub const DISCLAIMER: &str = "This is an estimate only. Actual taxes and fees may vary. \
     Consult with a licensed tax professional or notary for accurate calculations. \
     Tax rates and UIT values are updated annually by SUNAT.";

/// Runs the tax and fee rules against a rate table.
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    rates: RateTable,
}

impl TaxCalculator {
    /// Creates a calculator for the given rate table.
    #[must_use]
    pub const fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// The rate table in use.
    #[must_use]
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Computes an estimate stamped with the current time.
    pub fn calculate(&self, input: &EstimationInput) -> Result<EstimationResult, EstimatorError> {
        self.calculate_at(input, Utc::now())
    }

    /// Computes an estimate stamped with `calculated_at`.
    ///
    /// Rules run in fixed order: Alcabala, Impuesto a la Renta, commission,
    /// notary, registry. Any failure aborts the whole estimate.
    pub fn calculate_at(
        &self,
        input: &EstimationInput,
        calculated_at: DateTime<Utc>,
    ) -> Result<EstimationResult, EstimatorError> {
        let rates = &self.rates;

        let alcabala = rules::transfer_tax(input, rates)?;
        let renta = rules::capital_gains_tax(input, rates)?;
        let commission = rules::commission(input, rates)?;
        let notary_fees = rules::notary_fee(input, rates)?;
        let registry_fees = rules::registry_fee(input, rates)?;
        let other_fees = Decimal::ZERO;

        let mut assumptions = alcabala.assumptions;
        assumptions.extend(renta.assumptions);
        assumptions.push(format!(
            "Commission calculated as {}% of sale price (tech-enabled rate)",
            as_percent(rates.commission_rate)?,
        ));
        assumptions.push(format!(
            "Notary fees estimated at base fee + {}% of sale price",
            as_percent(rates.notary_rate)?,
        ));
        assumptions.push(format!(
            "SUNARP registry fees estimated at base fee + {}% of sale price",
            as_percent(rates.registry_rate)?,
        ));

        let total_deductions = [
            alcabala.amount,
            renta.amount,
            commission,
            notary_fees,
            registry_fees,
            other_fees,
        ]
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| {
            checked_add(acc, amount, "total deductions")
        })?;

        // The acquisition price is subtracted again even though the capital
        // gains rule already used it.
        let mut net_profit = checked_sub(input.sale_price, total_deductions, "net profit")?;
        if let Some(acquisition_price) = input.acquisition_price {
            net_profit = checked_sub(net_profit, acquisition_price, "net profit")?;
        }

        let breakdown = vec![
            LineItem {
                name: "Alcabala (Transfer Tax)".to_string(),
                amount: alcabala.amount,
                percentage: rate_if_charged(alcabala.amount, rates.transfer_tax_rate)?,
                description: "Municipal transfer tax on property sales".to_string(),
            },
            LineItem {
                name: "Impuesto a la Renta (Capital Gains)".to_string(),
                amount: renta.amount,
                percentage: rate_if_charged(renta.amount, rates.capital_gains_rate)?,
                description: "Tax on profit from property sale".to_string(),
            },
            LineItem {
                name: "Commission".to_string(),
                amount: commission,
                percentage: rate_if_charged(commission, rates.commission_rate)?,
                description: "Real estate agent commission".to_string(),
            },
            LineItem {
                name: "Notary Fees".to_string(),
                amount: notary_fees,
                percentage: None,
                description: "Fees for escritura pública (public deed)".to_string(),
            },
            LineItem {
                name: "Registry Fees (SUNARP)".to_string(),
                amount: registry_fees,
                percentage: None,
                description: "Property registry fees".to_string(),
            },
        ];

        Ok(EstimationResult {
            estimator_run_id: None,
            inputs: input.clone(),
            alcabala: alcabala.amount,
            impuesto_renta: renta.amount,
            commission,
            notary_fees,
            registry_fees,
            other_fees,
            total_deductions,
            net_profit,
            breakdown,
            assumptions,
            disclaimer: DISCLAIMER.to_string(),
            calculated_at,
        })
    }
}

fn rate_if_charged(amount: Decimal, rate: Decimal) -> Result<Option<Decimal>, EstimatorError> {
    if amount > Decimal::ZERO {
        as_percent(rate).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assumption_order() {
        let result = TaxCalculator::default()
            .calculate(&EstimationInput::new(dec!(40000), "LIMA"))
            .unwrap();

        assert_eq!(result.assumptions.len(), 6);
        assert!(result.assumptions[0].starts_with("Property value"));
        assert!(result.assumptions[1].starts_with("No acquisition price provided"));
        assert!(result.assumptions[2].starts_with("Capital gains tax calculated as 5%"));
        assert_eq!(
            result.assumptions[3],
            "Commission calculated as 4% of sale price (tech-enabled rate)"
        );
        assert_eq!(
            result.assumptions[4],
            "Notary fees estimated at base fee + 0.7% of sale price"
        );
        assert_eq!(
            result.assumptions[5],
            "SUNARP registry fees estimated at base fee + 0.3% of sale price"
        );
    }

    #[test]
    fn test_breakdown_percentages() {
        let result = TaxCalculator::default()
            .calculate(&EstimationInput::new(dec!(40000), "LIMA"))
            .unwrap();

        let percentages: Vec<Option<Decimal>> =
            result.breakdown.iter().map(|item| item.percentage).collect();
        assert_eq!(
            percentages,
            vec![None, Some(dec!(5)), Some(dec!(4)), None, None]
        );
        assert_eq!(result.breakdown[0].name, "Alcabala (Transfer Tax)");
        assert_eq!(result.breakdown[4].name, "Registry Fees (SUNARP)");
    }

    #[test]
    fn test_disclaimer_and_timestamp() {
        let at = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let result = TaxCalculator::default()
            .calculate_at(&EstimationInput::new(dec!(40000), "LIMA"), at)
            .unwrap();

        assert_eq!(result.calculated_at, at);
        assert_eq!(result.disclaimer, DISCLAIMER);
        assert!(result.estimator_run_id.is_none());
        assert_eq!(result.other_fees, Decimal::ZERO);
    }

    #[test]
    fn test_net_profit_overflow_is_a_failure() {
        let input = EstimationInput::new(dec!(1), "LIMA").with_acquisition_price(Decimal::MAX);
        let result = TaxCalculator::default().calculate(&input);
        assert_eq!(
            result.unwrap_err(),
            EstimatorError::Overflow { step: "net profit" }
        );
    }
}
