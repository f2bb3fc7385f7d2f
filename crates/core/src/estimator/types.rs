//! Estimator data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameters of a property sale, already validated by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationInput {
    /// Caller's property identifier, echoed back for correlation.
    #[serde(default)]
    pub property_id: Option<String>,
    /// Sale price (> 0).
    pub sale_price: Decimal,
    /// Municipality code (e.g. "LIMA", "MIRAFLORES").
    pub municipality: String,
    /// Original purchase price, if known.
    #[serde(default)]
    pub acquisition_price: Option<Decimal>,
    /// Original purchase date, if known.
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
    /// Whether the seller lived in the property as their main home.
    #[serde(default)]
    pub is_primary_residence: bool,
    /// Years of ownership. Informational only.
    #[serde(default)]
    pub ownership_duration_years: Option<i32>,
}

impl EstimationInput {
    /// Creates an input with only the required fields set.
    #[must_use]
    pub fn new(sale_price: Decimal, municipality: impl Into<String>) -> Self {
        Self {
            property_id: None,
            sale_price,
            municipality: municipality.into(),
            acquisition_price: None,
            acquisition_date: None,
            is_primary_residence: false,
            ownership_duration_years: None,
        }
    }

    /// Sets the acquisition price.
    #[must_use]
    pub fn with_acquisition_price(mut self, price: Decimal) -> Self {
        self.acquisition_price = Some(price);
        self
    }

    /// Marks the property as the seller's primary residence.
    #[must_use]
    pub fn primary_residence(mut self) -> Self {
        self.is_primary_residence = true;
        self
    }
}

/// Amount produced by a rule plus the notes explaining how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Computed amount (>= 0).
    pub amount: Decimal,
    /// Human-readable notes, in the order the rule produced them.
    pub assumptions: Vec<String>,
}

/// One row of the deduction breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name.
    pub name: String,
    /// Deducted amount.
    pub amount: Decimal,
    /// Rate applied, as a percentage. Absent for fixed-fee items and zero amounts.
    pub percentage: Option<Decimal>,
    /// Short explanation.
    pub description: String,
}

/// Full estimate for a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Identifier of this estimation run, assigned by the caller.
    pub estimator_run_id: Option<Uuid>,
    /// The input the estimate was computed from.
    pub inputs: EstimationInput,
    /// Transfer tax.
    pub alcabala: Decimal,
    /// Capital gains tax.
    pub impuesto_renta: Decimal,
    /// Agent commission.
    pub commission: Decimal,
    /// Notary fees.
    pub notary_fees: Decimal,
    /// SUNARP registry fees.
    pub registry_fees: Decimal,
    /// Reserved for optional add-ons. Always zero.
    pub other_fees: Decimal,
    /// Sum of the six deduction amounts.
    pub total_deductions: Decimal,
    /// Sale price minus deductions, minus the acquisition price when one was given.
    pub net_profit: Decimal,
    /// Deduction rows, in pipeline order.
    pub breakdown: Vec<LineItem>,
    /// Notes from every rule, in pipeline order.
    pub assumptions: Vec<String>,
    /// Fixed disclaimer text.
    pub disclaimer: String,
    /// When the estimate was computed.
    pub calculated_at: DateTime<Utc>,
}
