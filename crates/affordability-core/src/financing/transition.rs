//! Term and rate selection when the financing type changes.

use serde::{Deserialize, Serialize};

use crate::financing::plans::FinancingPlan;
use crate::types::Percent;

/// Term and rate a plan starts with when it becomes the active financing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSelection {
    pub term_years: u32,
    pub interest_rate_percent: Percent,
}

/// Switching financing type resets the term to the plan's shortest and the
/// rate to its default. Neither value carries over from the previous plan.
pub fn on_financing_change(plan: &FinancingPlan) -> PlanSelection {
    PlanSelection {
        // a validated plan always has a first term
        term_years: plan.first_term().unwrap_or_default(),
        interest_rate_percent: plan.default_rate,
    }
}
