//! The full set of values a buyer enters, and the policies that change them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::AffordabilityError;
use crate::financing::engine::ComputationInput;
use crate::financing::plans::{PlanTable, BANK_FINANCING};
use crate::financing::transition::on_financing_change;
use crate::types::{Money, Percent};
use crate::AffordabilityResult;

/// Down-payment terms the form offers, in months.
pub const DOWN_PAYMENT_TERM_OPTIONS: RangeInclusive<u32> = 1..=36;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotType {
    #[default]
    InnerLot,
    EndLot,
    CornerLot,
}

impl fmt::Display for LotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LotType::InnerLot => "Inner Lot",
            LotType::EndLot => "End Lot",
            LotType::CornerLot => "Corner Lot",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionStatus {
    #[default]
    PreSelling,
    OngoingConstruction,
    ReadyForOccupancy,
}

impl fmt::Display for ConstructionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstructionStatus::PreSelling => "Pre-Selling",
            ConstructionStatus::OngoingConstruction => "On-Going Construction",
            ConstructionStatus::ReadyForOccupancy => "Ready for Occupancy (RFO)",
        })
    }
}

/// Descriptive fields printed on the computation sheet. None of them
/// affect the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDetails {
    pub project_name: String,
    pub house_model: String,
    /// Square metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_area: Option<Decimal>,
    pub lot_type: LotType,
    pub construction_status: ConstructionStatus,
}

/// Everything on the data-entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub price: Money,
    pub financing_type: String,
    pub down_payment_percent: Percent,
    pub down_payment_amount: Money,
    pub reservation_fee: Money,
    pub down_payment_term_months: u32,
    pub loan_term_years: u32,
    pub interest_rate_percent: Percent,
    pub property: PropertyDetails,
}

impl Default for FormState {
    /// The state a reset returns the form to.
    fn default() -> Self {
        Self {
            price: dec!(5_000_000),
            financing_type: BANK_FINANCING.into(),
            down_payment_percent: dec!(20),
            down_payment_amount: dec!(1_000_000),
            reservation_fee: dec!(50_000),
            down_payment_term_months: 12,
            loan_term_years: 5,
            interest_rate_percent: dec!(7.5),
            property: PropertyDetails::default(),
        }
    }
}

impl FormState {
    /// Return the form with `financing_type` active, its term and rate reset
    /// by [`on_financing_change`]. Other fields are kept.
    pub fn switch_financing(&self, table: &PlanTable, financing_type: &str) -> AffordabilityResult<Self> {
        let plan = table.get_plan(financing_type)?;
        let selection = on_financing_change(plan);
        Ok(Self {
            financing_type: plan.name.clone(),
            loan_term_years: selection.term_years,
            interest_rate_percent: selection.interest_rate_percent,
            ..self.clone()
        })
    }

    /// Reject values the form itself would never offer.
    pub fn validate(&self) -> AffordabilityResult<()> {
        if !DOWN_PAYMENT_TERM_OPTIONS.contains(&self.down_payment_term_months) {
            return Err(AffordabilityError::InvalidInput {
                field: "down_payment_term_months".into(),
                reason: format!(
                    "Down payment term must be between {} and {} months",
                    DOWN_PAYMENT_TERM_OPTIONS.start(),
                    DOWN_PAYMENT_TERM_OPTIONS.end()
                ),
            });
        }
        if let Some(area) = self.property.lot_area {
            if area <= Decimal::ZERO {
                return Err(AffordabilityError::InvalidInput {
                    field: "lot_area".into(),
                    reason: "Lot area must be positive".into(),
                });
            }
        }
        Ok(())
    }

    /// Snapshot the numeric fields for one computation.
    pub fn to_input(&self) -> ComputationInput {
        ComputationInput {
            price: self.price,
            financing_type: self.financing_type.clone(),
            down_payment_percent: self.down_payment_percent,
            down_payment_amount: self.down_payment_amount,
            reservation_fee: self.reservation_fee,
            down_payment_term_months: self.down_payment_term_months,
            selected_term_years: self.loan_term_years,
            interest_rate_percent: self.interest_rate_percent,
        }
    }
}
