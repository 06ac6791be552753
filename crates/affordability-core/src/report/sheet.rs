//! The sample-computation sheet handed to whatever renders or exports it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::financing::engine::ComputationResult;
use crate::financing::form::FormState;
use crate::financing::plans::{DownPaymentModel, FinancingPlan};
use crate::report::currency::{format_peso, format_peso_ceil, format_plain};

pub const DISCLAIMER: &str = "This sample computation is for the purpose of illustration \
and is subject to possible change without prior notice.";

const BLANK: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLine {
    pub label: String,
    pub value: String,
}

impl SheetLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderLine {
    pub loan_term: String,
    pub monthly_amortization: String,
    pub required_income: String,
}

/// Display-ready text for one generated computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationSheet {
    pub title: String,
    pub financing_type: String,
    pub generation: u64,
    pub date_generated: String,
    pub property: Vec<SheetLine>,
    pub down_payment_summary: Vec<SheetLine>,
    pub loanable_amount: String,
    pub amortization: Vec<LadderLine>,
    pub disclaimer: String,
}

impl ComputationSheet {
    pub fn build(
        form: &FormState,
        plan: &FinancingPlan,
        result: &ComputationResult,
        generation: u64,
        generated_at: NaiveDateTime,
    ) -> Self {
        let date_generated = generated_at.format("%m/%d/%Y, %-I:%M:%S %p").to_string();
        let details = &form.property;

        let property = vec![
            SheetLine::new("Project Name", or_blank(&details.project_name)),
            SheetLine::new("House Model", or_blank(&details.house_model)),
            SheetLine::new(
                "Lot Area",
                details
                    .lot_area
                    .map(|a| format!("{} sq.m.", format_plain(a)))
                    .unwrap_or_else(|| BLANK.to_string()),
            ),
            SheetLine::new("Lot Type", details.lot_type.to_string()),
            SheetLine::new("Construction Status", details.construction_status.to_string()),
            SheetLine::new("Date Generated", date_generated.clone()),
        ];

        let basis = match plan.down_payment_model {
            DownPaymentModel::PercentOfPrice => format!("{}%", format_plain(form.down_payment_percent)),
            DownPaymentModel::FixedAmount => "Amount".to_string(),
        };

        let down_payment_summary = vec![
            SheetLine::new("Total Contract Price", format_peso(result.price)),
            SheetLine::new(
                format!("Required Down Payment ({basis})"),
                format_peso(result.down_payment_base),
            ),
            SheetLine::new(
                "Less: Reservation Fee",
                format!("-{}", format_peso(form.reservation_fee)),
            ),
            SheetLine::new(
                "Total Down Payment",
                format_peso(result.down_payment_after_reservation),
            ),
            SheetLine::new(
                "Down Payment Term",
                months_label(result.down_payment_term_months),
            ),
            SheetLine::new("Monthly Down Payment", format_peso(result.monthly_down_payment)),
        ];

        let amortization = result
            .amortization_ladder
            .iter()
            .map(|row| LadderLine {
                loan_term: format!("{} years", row.term_years),
                monthly_amortization: format_peso_ceil(row.monthly_payment),
                required_income: format_peso_ceil(row.required_income),
            })
            .collect();

        Self {
            title: format!("Sample Computation - {}", plan.name),
            financing_type: plan.name.clone(),
            generation,
            date_generated,
            property,
            down_payment_summary,
            loanable_amount: format_peso(result.loanable_amount),
            amortization,
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Every label/value pair in reading order, ladder rows included, for
    /// flat renderings such as CSV.
    pub fn flatten(&self) -> Vec<(&'static str, String, String)> {
        let mut rows = Vec::new();
        for line in &self.property {
            rows.push(("property", line.label.clone(), line.value.clone()));
        }
        for line in &self.down_payment_summary {
            rows.push(("down_payment", line.label.clone(), line.value.clone()));
        }
        rows.push((
            "loan",
            "Loanable Amount".to_string(),
            self.loanable_amount.clone(),
        ));
        for line in &self.amortization {
            rows.push((
                "amortization",
                format!("{} Monthly Amortization", line.loan_term),
                line.monthly_amortization.clone(),
            ));
            rows.push((
                "amortization",
                format!("{} Required Income", line.loan_term),
                line.required_income.clone(),
            ));
        }
        rows
    }
}

fn or_blank(value: &str) -> String {
    if value.trim().is_empty() {
        BLANK.to_string()
    } else {
        value.to_string()
    }
}

fn months_label(months: u32) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{months} months")
    }
}
