//! Individual tax and fee rules.
//!
//! Each rule is a pure function of the input and the rate table. The tax
//! rules return their notes alongside the amount; the fee rules are plain
//! formulas whose fixed notes are attached by the calculator.

use rust_decimal::Decimal;

use super::error::EstimatorError;
use super::rates::{RateTable, as_percent};
use super::types::{EstimationInput, RuleOutcome};

pub(crate) fn checked_mul(
    a: Decimal,
    b: Decimal,
    step: &'static str,
) -> Result<Decimal, EstimatorError> {
    a.checked_mul(b).ok_or(EstimatorError::Overflow { step })
}

pub(crate) fn checked_add(
    a: Decimal,
    b: Decimal,
    step: &'static str,
) -> Result<Decimal, EstimatorError> {
    a.checked_add(b).ok_or(EstimatorError::Overflow { step })
}

pub(crate) fn checked_sub(
    a: Decimal,
    b: Decimal,
    step: &'static str,
) -> Result<Decimal, EstimatorError> {
    a.checked_sub(b).ok_or(EstimatorError::Overflow { step })
}

/// Alcabala: transfer tax on the part of the sale price above the exemption.
///
/// `municipality` does not change the rate yet.
pub fn transfer_tax(
    input: &EstimationInput,
    rates: &RateTable,
) -> Result<RuleOutcome, EstimatorError> {
    let currency = &rates.currency;
    let threshold = rates.exemption_threshold()?;

    if input.sale_price <= threshold {
        return Ok(RuleOutcome {
            amount: Decimal::ZERO,
            assumptions: vec![format!(
                "Property value ({} {currency}) is below exemption threshold \
                 ({threshold} {currency} = {} UIT). Alcabala is 0.",
                input.sale_price,
                rates.transfer_tax_exemption_units.normalize(),
            )],
        });
    }

    let taxable = checked_sub(input.sale_price, threshold, "alcabala taxable amount")?;
    let amount = checked_mul(taxable, rates.transfer_tax_rate, "alcabala")?;

    Ok(RuleOutcome {
        amount,
        assumptions: vec![format!(
            "Alcabala calculated as {}% of taxable amount \
             ({taxable} {currency} = sale price - exemption threshold)",
            as_percent(rates.transfer_tax_rate)?,
        )],
    })
}

/// Impuesto a la Renta: tax on the gain over the acquisition price.
///
/// A missing acquisition price is estimated as a fixed share of the sale
/// price. `acquisition_date` is not used by the current rate set.
pub fn capital_gains_tax(
    input: &EstimationInput,
    rates: &RateTable,
) -> Result<RuleOutcome, EstimatorError> {
    let currency = &rates.currency;
    let mut assumptions = Vec::new();

    let acquisition_price = match input.acquisition_price {
        Some(price) => price,
        None => {
            let estimated = checked_mul(
                input.sale_price,
                rates.assumed_acquisition_ratio,
                "estimated acquisition price",
            )?;
            assumptions.push(format!(
                "No acquisition price provided. Estimated at {}% of sale price \
                 ({estimated} {currency}) for conservative calculation.",
                as_percent(rates.assumed_acquisition_ratio)?,
            ));
            estimated
        }
    };

    let gain = checked_sub(input.sale_price, acquisition_price, "capital gain")?;

    if gain <= Decimal::ZERO {
        assumptions.push("No capital gain. Impuesto a la Renta is 0.".to_string());
        return Ok(RuleOutcome {
            amount: Decimal::ZERO,
            assumptions,
        });
    }

    if input.is_primary_residence {
        let limit = rates.residence_exemption_limit()?;
        if gain <= limit {
            assumptions.push(format!(
                "Primary residence exemption applies. Gain ({gain} {currency}) \
                 is below limit ({limit} {currency} = {} UIT).",
                rates.residence_exemption_units.normalize(),
            ));
            return Ok(RuleOutcome {
                amount: Decimal::ZERO,
                assumptions,
            });
        }
    }

    let amount = checked_mul(gain, rates.capital_gains_rate, "impuesto a la renta")?;
    assumptions.push(format!(
        "Capital gains tax calculated as {}% of gain \
         ({gain} {currency} = sale price - acquisition price)",
        as_percent(rates.capital_gains_rate)?,
    ));

    Ok(RuleOutcome {
        amount,
        assumptions,
    })
}

/// Agent commission on the sale price.
pub fn commission(input: &EstimationInput, rates: &RateTable) -> Result<Decimal, EstimatorError> {
    checked_mul(input.sale_price, rates.commission_rate, "commission")
}

/// Notary fees for the public deed: base fee plus a share of the sale price.
pub fn notary_fee(input: &EstimationInput, rates: &RateTable) -> Result<Decimal, EstimatorError> {
    let variable = checked_mul(input.sale_price, rates.notary_rate, "notary fees")?;
    checked_add(rates.notary_base_fee, variable, "notary fees")
}

/// SUNARP registry fees: base fee plus a share of the sale price.
pub fn registry_fee(input: &EstimationInput, rates: &RateTable) -> Result<Decimal, EstimatorError> {
    let variable = checked_mul(input.sale_price, rates.registry_rate, "registry fees")?;
    checked_add(rates.registry_base_fee, variable, "registry fees")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(sale_price: Decimal) -> EstimationInput {
        EstimationInput::new(sale_price, "LIMA")
    }

    #[test]
    fn test_transfer_tax_at_threshold_is_exempt() {
        let outcome = transfer_tax(&input(dec!(51500)), &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert_eq!(outcome.assumptions.len(), 1);
        assert!(outcome.assumptions[0].contains("51500 PEN = 10 UIT"));
    }

    #[test]
    fn test_transfer_tax_above_threshold() {
        let outcome = transfer_tax(&input(dec!(100000)), &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, dec!(1455));
        assert_eq!(
            outcome.assumptions,
            vec![
                "Alcabala calculated as 3% of taxable amount \
                 (48500 PEN = sale price - exemption threshold)"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_capital_gains_estimates_missing_acquisition_price() {
        let outcome = capital_gains_tax(&input(dec!(40000)), &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, dec!(400));
        assert_eq!(outcome.assumptions.len(), 2);
        assert!(outcome.assumptions[0].contains("Estimated at 80% of sale price"));
        assert!(outcome.assumptions[0].contains("32000"));
        assert!(outcome.assumptions[1].contains("8000"));
    }

    #[test]
    fn test_capital_gains_no_gain() {
        let sale = input(dec!(90000)).with_acquisition_price(dec!(90000));
        let outcome = capital_gains_tax(&sale, &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert_eq!(
            outcome.assumptions,
            vec!["No capital gain. Impuesto a la Renta is 0.".to_string()]
        );
    }

    #[test]
    fn test_capital_gains_residence_exemption_at_limit() {
        let sale = input(dec!(125750))
            .with_acquisition_price(dec!(100000))
            .primary_residence();
        let outcome = capital_gains_tax(&sale, &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert!(outcome.assumptions[0].contains("Primary residence exemption applies"));
        assert!(outcome.assumptions[0].contains("25750 PEN = 5 UIT"));
    }

    #[test]
    fn test_capital_gains_residence_above_limit_is_taxed() {
        let sale = input(dec!(130000))
            .with_acquisition_price(dec!(100000))
            .primary_residence();
        let outcome = capital_gains_tax(&sale, &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, dec!(1500));
    }

    #[test]
    fn test_capital_gains_non_residence_small_gain_is_taxed() {
        let sale = input(dec!(110000)).with_acquisition_price(dec!(100000));
        let outcome = capital_gains_tax(&sale, &RateTable::default()).unwrap();
        assert_eq!(outcome.amount, dec!(500));
    }

    #[test]
    fn test_fee_formulas() {
        let rates = RateTable::default();
        let sale = input(dec!(40000));
        assert_eq!(commission(&sale, &rates).unwrap(), dec!(1600));
        assert_eq!(notary_fee(&sale, &rates).unwrap(), dec!(780));
        assert_eq!(registry_fee(&sale, &rates).unwrap(), dec!(420));
    }

    #[test]
    fn test_overflow_is_reported() {
        let rates = RateTable {
            commission_rate: dec!(2),
            ..RateTable::default()
        };
        assert_eq!(
            commission(&input(Decimal::MAX), &rates),
            Err(EstimatorError::Overflow { step: "commission" })
        );
    }
}
