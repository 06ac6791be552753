//! Financing plans and the table they are looked up from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AffordabilityError;
use crate::types::{Percent, Rate};
use crate::AffordabilityResult;

pub const BANK_FINANCING: &str = "Bank Financing";
pub const PAG_IBIG_FINANCING: &str = "Pag-IBIG Financing";

/// How a plan derives the required down payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentModel {
    /// A share of the contract price (`down_payment_percent`).
    PercentOfPrice,
    /// An amount the buyer states directly (`down_payment_amount`).
    FixedAmount,
}

/// Static configuration for one financing type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingPlan {
    /// Financing-type key, e.g. "Bank Financing".
    pub name: String,
    /// Maximum share of monthly income the amortization may take.
    pub income_ratio: Rate,
    /// Selectable loan terms in years, strictly increasing.
    pub terms: Vec<u32>,
    /// Interest rate (percent) selected when the plan becomes active.
    pub default_rate: Percent,
    pub down_payment_model: DownPaymentModel,
}

impl FinancingPlan {
    pub fn bank() -> Self {
        Self {
            name: BANK_FINANCING.into(),
            income_ratio: dec!(0.35),
            terms: vec![5, 10, 15, 20],
            default_rate: dec!(7.5),
            down_payment_model: DownPaymentModel::PercentOfPrice,
        }
    }

    pub fn pag_ibig() -> Self {
        Self {
            name: PAG_IBIG_FINANCING.into(),
            income_ratio: dec!(0.30),
            terms: vec![5, 10, 15, 20, 25, 30],
            default_rate: dec!(6.25),
            down_payment_model: DownPaymentModel::FixedAmount,
        }
    }

    /// Shortest term offered.
    pub fn first_term(&self) -> Option<u32> {
        self.terms.first().copied()
    }

    /// Longest term offered.
    pub fn last_term(&self) -> Option<u32> {
        self.terms.last().copied()
    }

    pub fn offers_term(&self, term_years: u32) -> bool {
        self.terms.binary_search(&term_years).is_ok()
    }

    /// Check the plan invariants: terms non-empty, positive and strictly
    /// increasing; income ratio in (0, 1]; default rate positive.
    pub fn validate(&self) -> AffordabilityResult<()> {
        let invalid = |reason: &str| AffordabilityError::InvalidPlan {
            plan: self.name.clone(),
            reason: reason.into(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.terms.is_empty() {
            return Err(invalid("at least one term is required"));
        }
        if self.terms[0] == 0 {
            return Err(invalid("terms must be positive"));
        }
        if self.terms.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("terms must be strictly increasing"));
        }
        if self.income_ratio <= Decimal::ZERO || self.income_ratio > Decimal::ONE {
            return Err(invalid("income_ratio must be in (0, 1]"));
        }
        if self.default_rate <= Decimal::ZERO {
            return Err(invalid("default_rate must be positive"));
        }
        Ok(())
    }
}

/// Ordered, immutable set of financing plans keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FinancingPlan>", into = "Vec<FinancingPlan>")]
pub struct PlanTable {
    plans: Vec<FinancingPlan>,
}

impl PlanTable {
    /// Build a table, validating every plan and rejecting duplicate names.
    pub fn new(plans: Vec<FinancingPlan>) -> AffordabilityResult<Self> {
        if plans.is_empty() {
            return Err(AffordabilityError::InvalidPlan {
                plan: String::new(),
                reason: "plan table must contain at least one plan".into(),
            });
        }
        for (i, plan) in plans.iter().enumerate() {
            plan.validate()?;
            if plans[..i].iter().any(|p| p.name == plan.name) {
                return Err(AffordabilityError::InvalidPlan {
                    plan: plan.name.clone(),
                    reason: "duplicate plan name".into(),
                });
            }
        }
        debug!(plans = plans.len(), "loaded financing plan table");
        Ok(Self { plans })
    }

    /// Look up a plan by its financing-type key.
    pub fn get_plan(&self, financing_type: &str) -> AffordabilityResult<&FinancingPlan> {
        self.plans
            .iter()
            .find(|p| p.name == financing_type)
            .ok_or_else(|| AffordabilityError::UnknownFinancingType(financing_type.to_string()))
    }

    pub fn plans(&self) -> &[FinancingPlan] {
        &self.plans
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plans.iter().map(|p| p.name.as_str())
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self {
            plans: vec![FinancingPlan::bank(), FinancingPlan::pag_ibig()],
        }
    }
}

impl TryFrom<Vec<FinancingPlan>> for PlanTable {
    type Error = AffordabilityError;

    fn try_from(plans: Vec<FinancingPlan>) -> Result<Self, Self::Error> {
        Self::new(plans)
    }
}

impl From<PlanTable> for Vec<FinancingPlan> {
    fn from(table: PlanTable) -> Self {
        table.plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_builtin_plans() {
        let table = PlanTable::default();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec![BANK_FINANCING, PAG_IBIG_FINANCING]);
        for plan in table.plans() {
            plan.validate().unwrap();
        }
    }

    #[test]
    fn test_get_plan() {
        let table = PlanTable::default();
        let bank = table.get_plan(BANK_FINANCING).unwrap();
        assert_eq!(bank.income_ratio, dec!(0.35));
        assert_eq!(bank.terms, vec![5, 10, 15, 20]);
        assert_eq!(bank.down_payment_model, DownPaymentModel::PercentOfPrice);

        let pag_ibig = table.get_plan(PAG_IBIG_FINANCING).unwrap();
        assert_eq!(pag_ibig.default_rate, dec!(6.25));
        assert_eq!(pag_ibig.last_term(), Some(30));
    }

    #[test]
    fn test_get_plan_unknown() {
        let table = PlanTable::default();
        let err = table.get_plan("Cash").unwrap_err();
        match err {
            AffordabilityError::UnknownFinancingType(key) => assert_eq!(key, "Cash"),
            other => panic!("Expected UnknownFinancingType, got {other:?}"),
        }
    }

    #[test]
    fn test_offers_term() {
        let plan = FinancingPlan::bank();
        assert!(plan.offers_term(15));
        assert!(!plan.offers_term(25));
    }

    #[test]
    fn test_validate_rejects_unsorted_terms() {
        let mut plan = FinancingPlan::bank();
        plan.terms = vec![5, 15, 10];
        assert!(matches!(
            plan.validate(),
            Err(AffordabilityError::InvalidPlan { .. })
        ));

        plan.terms = vec![5, 5];
        assert!(plan.validate().is_err());

        plan.terms = vec![];
        assert!(plan.validate().is_err());

        plan.terms = vec![0, 5];
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ratio_and_rate() {
        let mut plan = FinancingPlan::pag_ibig();
        plan.income_ratio = Decimal::ZERO;
        assert!(plan.validate().is_err());
        plan.income_ratio = dec!(1.2);
        assert!(plan.validate().is_err());
        plan.income_ratio = Decimal::ONE;
        assert!(plan.validate().is_ok());
        plan.default_rate = Decimal::ZERO;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_table_rejects_duplicates_and_empty() {
        assert!(PlanTable::new(vec![]).is_err());
        let err = PlanTable::new(vec![FinancingPlan::bank(), FinancingPlan::bank()]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_table_deserializes_from_plan_list() {
        let json = r#"[
            {
                "name": "In-House Financing",
                "income_ratio": "0.4",
                "terms": [1, 2, 3],
                "default_rate": "12",
                "down_payment_model": "percent_of_price"
            }
        ]"#;
        let table: PlanTable = serde_json::from_str(json).unwrap();
        let plan = table.get_plan("In-House Financing").unwrap();
        assert_eq!(plan.terms, vec![1, 2, 3]);
        assert_eq!(plan.default_rate, dec!(12));

        let bad = r#"[{"name": "X", "income_ratio": "0.4", "terms": [], "default_rate": "1", "down_payment_model": "fixed_amount"}]"#;
        assert!(serde_json::from_str::<PlanTable>(bad).is_err());
    }
}
