//! Down-payment schedule and amortization ladder construction.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::{monthly_payment, total_interest};
use crate::error::AffordabilityError;
use crate::financing::plans::{DownPaymentModel, FinancingPlan, PlanTable};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::AffordabilityResult;

/// Most rows a ladder shows: the selected term and up to two shorter ones.
pub const MAX_LADDER_ROWS: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One snapshot of the form values a computation runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationInput {
    /// Total contract price.
    pub price: Money,
    /// Key into the plan table.
    pub financing_type: String,
    /// Used only by percent-of-price plans (20 = 20%).
    pub down_payment_percent: Percent,
    /// Used only by fixed-amount plans.
    pub down_payment_amount: Money,
    pub reservation_fee: Money,
    /// Months the down payment is spread over. Must be > 0.
    pub down_payment_term_months: u32,
    /// Falls back to the plan's longest term when not offered.
    pub selected_term_years: u32,
    pub interest_rate_percent: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownPayment {
    pub base: Money,
    pub after_reservation: Money,
    pub monthly: Money,
}

/// Where the selected term landed in a plan's term list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermResolution {
    pub index: usize,
    pub term_years: u32,
    /// True when the selection was not offered and the longest term was used.
    pub fell_back: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderRow {
    pub term_years: u32,
    pub monthly_payment: Money,
    /// Minimum monthly income that keeps the payment within the plan's ratio.
    pub required_income: Money,
    pub total_interest: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub price: Money,
    pub down_payment_base: Money,
    pub down_payment_after_reservation: Money,
    pub down_payment_term_months: u32,
    pub monthly_down_payment: Money,
    pub loanable_amount: Money,
    /// Longest term first.
    pub amortization_ladder: Vec<LadderRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a computation and wrap it with warnings and metadata.
pub fn analyze_affordability(
    input: &ComputationInput,
    table: &PlanTable,
) -> AffordabilityResult<ComputationOutput<ComputationResult>> {
    let start = Instant::now();
    let plan = table.get_plan(&input.financing_type)?;
    let result = compute_with_plan(input, plan)?;
    let warnings = collect_warnings(input, plan, &result);

    let methodology = match plan.down_payment_model {
        DownPaymentModel::PercentOfPrice => {
            "Percent-of-price down payment, fixed-rate annuity amortization"
        }
        DownPaymentModel::FixedAmount => {
            "Fixed-amount down payment, fixed-rate annuity amortization"
        }
    };

    Ok(with_metadata(methodology, input, warnings, start, result))
}

/// Compute the down-payment summary and amortization ladder for `input`.
pub fn compute(input: &ComputationInput, table: &PlanTable) -> AffordabilityResult<ComputationResult> {
    let plan = table.get_plan(&input.financing_type)?;
    compute_with_plan(input, plan)
}

/// Compute against an already resolved plan.
pub fn compute_with_plan(
    input: &ComputationInput,
    plan: &FinancingPlan,
) -> AffordabilityResult<ComputationResult> {
    validate_input(input)?;

    let down_payment = compute_down_payment(input, plan)?;
    let loanable_amount = (input.price - down_payment.base).max(Decimal::ZERO);
    let amortization_ladder = build_amortization_ladder(
        loanable_amount,
        input.interest_rate_percent,
        plan,
        input.selected_term_years,
    );

    Ok(ComputationResult {
        price: input.price,
        down_payment_base: down_payment.base,
        down_payment_after_reservation: down_payment.after_reservation,
        down_payment_term_months: input.down_payment_term_months,
        monthly_down_payment: down_payment.monthly,
        loanable_amount,
        amortization_ladder,
    })
}

/// Required down payment, the balance after the reservation fee, and the
/// monthly instalment that balance is spread into.
pub fn compute_down_payment(
    input: &ComputationInput,
    plan: &FinancingPlan,
) -> AffordabilityResult<DownPayment> {
    if input.down_payment_term_months == 0 {
        return Err(AffordabilityError::InvalidInput {
            field: "down_payment_term_months".into(),
            reason: "Down payment term must be at least one month".into(),
        });
    }

    let base = match plan.down_payment_model {
        DownPaymentModel::PercentOfPrice => input.price * (input.down_payment_percent / dec!(100)),
        DownPaymentModel::FixedAmount => input.down_payment_amount,
    };
    let after_reservation = (base - input.reservation_fee).max(Decimal::ZERO);
    let monthly = after_reservation / Decimal::from(input.down_payment_term_months);

    Ok(DownPayment {
        base,
        after_reservation,
        monthly,
    })
}

/// Locate `selected_term_years` in the plan's terms, falling back to the
/// longest term when it is not offered.
///
/// Returns `None` only for a plan with no terms, which a validated
/// [`PlanTable`] never contains.
pub fn resolve_term_index(plan: &FinancingPlan, selected_term_years: u32) -> Option<TermResolution> {
    if let Some(index) = plan.terms.iter().position(|&t| t == selected_term_years) {
        return Some(TermResolution {
            index,
            term_years: selected_term_years,
            fell_back: false,
        });
    }

    let index = plan.terms.len().checked_sub(1)?;
    debug!(
        plan = %plan.name,
        selected = selected_term_years,
        fallback = plan.terms[index],
        "selected term not offered, using longest term"
    );
    Some(TermResolution {
        index,
        term_years: plan.terms[index],
        fell_back: true,
    })
}

/// Terms shown for a selection: the resolved term and up to two shorter
/// ones before it, longest first.
pub fn ladder_terms(plan: &FinancingPlan, selected_term_years: u32) -> Vec<u32> {
    let Some(resolved) = resolve_term_index(plan, selected_term_years) else {
        return Vec::new();
    };
    let start = (resolved.index + 1).saturating_sub(MAX_LADDER_ROWS);
    plan.terms[start..=resolved.index].iter().rev().copied().collect()
}

/// Monthly payment and required income for each ladder term.
pub fn build_amortization_ladder(
    loanable_amount: Money,
    annual_rate_percent: Percent,
    plan: &FinancingPlan,
    selected_term_years: u32,
) -> Vec<LadderRow> {
    ladder_terms(plan, selected_term_years)
        .into_iter()
        .map(|term_years| {
            let monthly = monthly_payment(loanable_amount, annual_rate_percent, term_years);
            let required_income = if plan.income_ratio > Decimal::ZERO {
                monthly.checked_div(plan.income_ratio).unwrap_or(Decimal::MAX)
            } else {
                Decimal::ZERO
            };
            LadderRow {
                term_years,
                monthly_payment: monthly,
                required_income,
                total_interest: total_interest(loanable_amount, annual_rate_percent, term_years),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation and warnings
// ---------------------------------------------------------------------------

fn validate_input(input: &ComputationInput) -> AffordabilityResult<()> {
    if input.price < Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: "price".into(),
            reason: "Price must be non-negative".into(),
        });
    }
    if input.down_payment_percent < Decimal::ZERO || input.down_payment_percent > dec!(100) {
        return Err(AffordabilityError::InvalidInput {
            field: "down_payment_percent".into(),
            reason: "Down payment percent must be between 0 and 100".into(),
        });
    }
    if input.down_payment_amount < Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: "down_payment_amount".into(),
            reason: "Down payment amount must be non-negative".into(),
        });
    }
    if input.reservation_fee < Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: "reservation_fee".into(),
            reason: "Reservation fee must be non-negative".into(),
        });
    }
    if input.interest_rate_percent < Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: "interest_rate_percent".into(),
            reason: "Interest rate must be non-negative".into(),
        });
    }
    Ok(())
}

fn collect_warnings(
    input: &ComputationInput,
    plan: &FinancingPlan,
    result: &ComputationResult,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(resolved) = resolve_term_index(plan, input.selected_term_years) {
        if resolved.fell_back {
            warnings.push(format!(
                "{} does not offer a {}-year term; showing terms up to {} years",
                plan.name, input.selected_term_years, resolved.term_years
            ));
        }
    }

    if input.reservation_fee > result.down_payment_base {
        warnings.push(format!(
            "Reservation fee {} exceeds the required down payment {}; remaining down payment is zero",
            input.reservation_fee, result.down_payment_base
        ));
    }

    if result.loanable_amount.is_zero() && input.price > Decimal::ZERO {
        warnings.push("Down payment covers the full price; nothing left to finance".into());
    }

    if input.interest_rate_percent.is_zero() {
        warnings.push("Zero interest rate: amortization is straight-line".into());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::plans::{BANK_FINANCING, PAG_IBIG_FINANCING};
    use pretty_assertions::assert_eq;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn bank_input() -> ComputationInput {
        ComputationInput {
            price: dec!(5_000_000),
            financing_type: BANK_FINANCING.into(),
            down_payment_percent: dec!(20),
            down_payment_amount: dec!(1_000_000),
            reservation_fee: dec!(50_000),
            down_payment_term_months: 12,
            selected_term_years: 5,
            interest_rate_percent: dec!(7.5),
        }
    }

    #[test]
    fn test_percent_down_payment() {
        let dp = compute_down_payment(&bank_input(), &FinancingPlan::bank()).unwrap();
        assert_eq!(dp.base, dec!(1_000_000));
        assert_eq!(dp.after_reservation, dec!(950_000));
        assert_close(dp.monthly, dec!(79166.67), TOL, "monthly down payment");
    }

    #[test]
    fn test_fixed_down_payment_ignores_price() {
        let mut input = bank_input();
        input.down_payment_amount = dec!(300_000);
        let plan = FinancingPlan::pag_ibig();
        let dp = compute_down_payment(&input, &plan).unwrap();
        assert_eq!(dp.base, dec!(300_000));

        input.price = dec!(9_000_000);
        assert_eq!(compute_down_payment(&input, &plan).unwrap().base, dec!(300_000));
    }

    #[test]
    fn test_reservation_larger_than_base_floors_at_zero() {
        let mut input = bank_input();
        input.reservation_fee = dec!(2_000_000);
        let dp = compute_down_payment(&input, &FinancingPlan::bank()).unwrap();
        assert_eq!(dp.after_reservation, Decimal::ZERO);
        assert_eq!(dp.monthly, Decimal::ZERO);
    }

    #[test]
    fn test_zero_down_payment_term_rejected() {
        let mut input = bank_input();
        input.down_payment_term_months = 0;
        let err = compute_down_payment(&input, &FinancingPlan::bank()).unwrap_err();
        match err {
            AffordabilityError::InvalidInput { field, .. } => {
                assert_eq!(field, "down_payment_term_months")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_term_found() {
        let plan = FinancingPlan::bank();
        let resolved = resolve_term_index(&plan, 15).unwrap();
        assert_eq!(
            resolved,
            TermResolution {
                index: 2,
                term_years: 15,
                fell_back: false
            }
        );
    }

    #[test]
    fn test_resolve_term_falls_back_to_longest() {
        let plan = FinancingPlan::bank();
        // 30 is a Pag-IBIG term left over after switching plans
        let resolved = resolve_term_index(&plan, 30).unwrap();
        assert_eq!(resolved.index, 3);
        assert_eq!(resolved.term_years, 20);
        assert!(resolved.fell_back);
    }

    #[test]
    fn test_resolve_term_empty_plan() {
        let mut plan = FinancingPlan::bank();
        plan.terms.clear();
        assert!(resolve_term_index(&plan, 5).is_none());
        assert!(ladder_terms(&plan, 5).is_empty());
    }

    #[test]
    fn test_ladder_terms_windows() {
        let plan = FinancingPlan::pag_ibig();
        assert_eq!(ladder_terms(&plan, 5), vec![5]);
        assert_eq!(ladder_terms(&plan, 10), vec![10, 5]);
        assert_eq!(ladder_terms(&plan, 15), vec![15, 10, 5]);
        assert_eq!(ladder_terms(&plan, 25), vec![25, 20, 15]);
        assert_eq!(ladder_terms(&plan, 30), vec![30, 25, 20]);
        assert_eq!(ladder_terms(&plan, 7), vec![30, 25, 20]);
    }

    #[test]
    fn test_single_term_plan() {
        let mut plan = FinancingPlan::bank();
        plan.terms = vec![10];
        let ladder = build_amortization_ladder(dec!(1_000_000), dec!(5), &plan, 10);
        assert_eq!(ladder.len(), 1);
        assert_eq!(ladder[0].term_years, 10);
    }

    #[test]
    fn test_required_income_uses_plan_ratio() {
        let plan = FinancingPlan::bank();
        let ladder = build_amortization_ladder(dec!(4_000_000), dec!(7.5), &plan, 5);
        let row = &ladder[0];
        assert_eq!(row.required_income, row.monthly_payment / dec!(0.35));
        assert_close(row.monthly_payment, dec!(80151.79), TOL, "monthly payment");
        assert_close(row.required_income, dec!(229005.13), TOL, "required income");
    }

    #[test]
    fn test_ladder_saturates_for_loan_near_decimal_max() {
        let loanable = dec!(70_000_000_000_000_000_000_000_000_000);
        let ladder = build_amortization_ladder(loanable, dec!(7.5), &FinancingPlan::bank(), 20);

        assert_eq!(ladder.len(), 3);
        for row in &ladder {
            assert!(row.monthly_payment > Decimal::ZERO && row.monthly_payment < Decimal::MAX);
            assert_eq!(row.total_interest, Decimal::MAX - loanable);
        }
    }

    #[test]
    fn test_compute_with_extreme_rate_saturates() {
        let mut input = bank_input();
        input.interest_rate_percent = dec!(50_000_000_000_000_000_000_000_000_000);
        let result = compute(&input, &PlanTable::default()).unwrap();

        let row = &result.amortization_ladder[0];
        assert_eq!(row.monthly_payment, Decimal::MAX);
        assert_eq!(row.required_income, Decimal::MAX);
    }

    #[test]
    fn test_compute_scenario_pag_ibig() {
        let table = PlanTable::default();
        let input = ComputationInput {
            price: dec!(2_000_000),
            financing_type: PAG_IBIG_FINANCING.into(),
            down_payment_percent: dec!(20),
            down_payment_amount: dec!(300_000),
            reservation_fee: dec!(20_000),
            down_payment_term_months: 10,
            selected_term_years: 30,
            interest_rate_percent: dec!(6.25),
        };
        let result = compute(&input, &table).unwrap();
        assert_eq!(result.down_payment_base, dec!(300_000));
        assert_eq!(result.down_payment_after_reservation, dec!(280_000));
        assert_eq!(result.monthly_down_payment, dec!(28_000));
        assert_eq!(result.loanable_amount, dec!(1_700_000));
        let terms: Vec<u32> = result.amortization_ladder.iter().map(|r| r.term_years).collect();
        assert_eq!(terms, vec![30, 25, 20]);
    }

    #[test]
    fn test_compute_rejects_negative_inputs() {
        let table = PlanTable::default();
        let mut input = bank_input();
        input.price = dec!(-1);
        assert!(compute(&input, &table).is_err());

        let mut input = bank_input();
        input.down_payment_percent = dec!(101);
        assert!(compute(&input, &table).is_err());

        let mut input = bank_input();
        input.interest_rate_percent = dec!(-0.5);
        assert!(compute(&input, &table).is_err());
    }

    #[test]
    fn test_analyze_warns_on_term_fallback() {
        let table = PlanTable::default();
        let mut input = bank_input();
        input.selected_term_years = 25;
        let output = analyze_affordability(&input, &table).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("25-year"));
        assert_eq!(output.result.amortization_ladder[0].term_years, 20);
    }

    #[test]
    fn test_analyze_warns_on_full_cash_purchase() {
        let table = PlanTable::default();
        let mut input = bank_input();
        input.down_payment_percent = dec!(100);
        let output = analyze_affordability(&input, &table).unwrap();
        assert_eq!(output.result.loanable_amount, Decimal::ZERO);
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("nothing left to finance")));
        for row in &output.result.amortization_ladder {
            assert_eq!(row.monthly_payment, Decimal::ZERO);
        }
    }

    #[test]
    fn test_analyze_clean_input_has_no_warnings() {
        let output = analyze_affordability(&bank_input(), &PlanTable::default()).unwrap();
        assert!(output.warnings.is_empty());
        assert!(output.methodology.contains("Percent-of-price"));
        assert_eq!(output.assumptions["financing_type"], BANK_FINANCING);
    }
}
