use affordability_core::amortization::monthly_payment;
use affordability_core::financing::{
    self, build_amortization_ladder, compute, resolve_term_index, ComputationInput,
    FinancingPlan, FormState, PlanTable,
};
use affordability_core::financing::plans::{BANK_FINANCING, PAG_IBIG_FINANCING};
use affordability_core::AffordabilityError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Helpers
// ===========================================================================

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{}: expected ~{}, got {}",
        msg,
        expected,
        actual
    );
}

fn bank_input(selected_term_years: u32) -> ComputationInput {
    ComputationInput {
        price: dec!(5_000_000),
        financing_type: BANK_FINANCING.into(),
        down_payment_percent: dec!(20),
        down_payment_amount: dec!(1_000_000),
        reservation_fee: dec!(50_000),
        down_payment_term_months: 12,
        selected_term_years,
        interest_rate_percent: dec!(7.5),
    }
}

// ===========================================================================
// Worked scenarios
// ===========================================================================

#[test]
fn test_bank_financing_shortest_term() {
    let result = compute(&bank_input(5), &PlanTable::default()).unwrap();

    assert_eq!(result.price, dec!(5_000_000));
    assert_eq!(result.down_payment_base, dec!(1_000_000));
    assert_eq!(result.down_payment_after_reservation, dec!(950_000));
    assert_eq!(result.down_payment_term_months, 12);
    assert_close(result.monthly_down_payment, dec!(79166.67), dec!(0.01), "monthly DP");
    assert_eq!(result.loanable_amount, dec!(4_000_000));

    assert_eq!(result.amortization_ladder.len(), 1);
    let row = &result.amortization_ladder[0];
    assert_eq!(row.term_years, 5);
    // 4M at 0.625%/month over 60 months
    assert_close(row.monthly_payment, dec!(80151.79), dec!(0.01), "monthly payment");
    assert_close(row.required_income, dec!(229005.13), dec!(0.01), "required income");
}

#[test]
fn test_bank_financing_longest_term_ladder() {
    let result = compute(&bank_input(20), &PlanTable::default()).unwrap();
    let terms: Vec<u32> = result.amortization_ladder.iter().map(|r| r.term_years).collect();
    assert_eq!(terms, vec![20, 15, 10]);

    assert_close(
        result.amortization_ladder[0].monthly_payment,
        dec!(32223.73),
        dec!(0.01),
        "20-year payment",
    );
    assert_close(
        result.amortization_ladder[2].monthly_payment,
        dec!(47480.71),
        dec!(0.01),
        "10-year payment",
    );
}

#[test]
fn test_pag_ibig_fixed_down_payment() {
    let input = ComputationInput {
        price: dec!(2_000_000),
        financing_type: PAG_IBIG_FINANCING.into(),
        down_payment_percent: dec!(20),
        down_payment_amount: dec!(300_000),
        reservation_fee: dec!(50_000),
        down_payment_term_months: 12,
        selected_term_years: 5,
        interest_rate_percent: dec!(6.25),
    };
    let result = compute(&input, &PlanTable::default()).unwrap();
    assert_eq!(result.down_payment_base, dec!(300_000));
    assert_eq!(result.loanable_amount, dec!(1_700_000));
}

#[test]
fn test_unknown_financing_type() {
    let mut input = bank_input(5);
    input.financing_type = "Rent-to-Own".into();
    let err = compute(&input, &PlanTable::default()).unwrap_err();
    match err {
        AffordabilityError::UnknownFinancingType(key) => assert_eq!(key, "Rent-to-Own"),
        other => panic!("Expected UnknownFinancingType, got {other:?}"),
    }
    assert!(PlanTable::default().get_plan("Rent-to-Own").is_err());
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_ladder_length_and_order_for_every_selection() {
    for plan in PlanTable::default().plans() {
        for selected in 0..=35u32 {
            let ladder = build_amortization_ladder(dec!(1_500_000), dec!(6), plan, selected);
            let idx = resolve_term_index(plan, selected).unwrap().index;

            assert!((1..=3).contains(&ladder.len()));
            assert_eq!(ladder.len(), (idx + 1).min(3), "{} / {}", plan.name, selected);
            assert!(
                ladder.windows(2).all(|w| w[0].term_years > w[1].term_years),
                "ladder not strictly decreasing for {} / {}",
                plan.name,
                selected
            );
            assert_eq!(ladder[0].term_years, plan.terms[idx]);
        }
    }
}

#[test]
fn test_compute_is_idempotent() {
    let table = PlanTable::default();
    let input = bank_input(15);
    let first = compute(&input, &table).unwrap();
    let second = compute(&input, &table).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_down_payment_after_reservation_bounds() {
    let table = PlanTable::default();
    for fee in [dec!(0), dec!(50_000), dec!(999_999), dec!(1_000_000), dec!(3_000_000)] {
        let mut input = bank_input(10);
        input.reservation_fee = fee;
        let result = compute(&input, &table).unwrap();
        assert!(result.down_payment_after_reservation <= result.down_payment_base);
        if fee <= result.down_payment_base {
            assert_eq!(
                result.down_payment_after_reservation,
                result.down_payment_base - fee
            );
        } else {
            assert_eq!(result.down_payment_after_reservation, Decimal::ZERO);
        }
    }
}

#[test]
fn test_zero_rate_payment_is_exact_straight_line() {
    for term in [1u32, 5, 25] {
        let p = dec!(1_234_567.89);
        assert_eq!(monthly_payment(p, Decimal::ZERO, term), p / Decimal::from(term * 12));
        assert_eq!(monthly_payment(p, dec!(7.5), 0), Decimal::ZERO);
    }
}

#[test]
fn test_single_term_plan_from_custom_table() {
    let plan = FinancingPlan {
        name: "Developer Financing".into(),
        income_ratio: dec!(0.4),
        terms: vec![3],
        default_rate: dec!(14),
        down_payment_model: financing::DownPaymentModel::PercentOfPrice,
    };
    let table = PlanTable::new(vec![plan]).unwrap();
    let mut input = bank_input(3);
    input.financing_type = "Developer Financing".into();
    let result = compute(&input, &table).unwrap();
    assert_eq!(result.amortization_ladder.len(), 1);
    assert_eq!(result.amortization_ladder[0].term_years, 3);
}

// ===========================================================================
// Plan switching
// ===========================================================================

#[test]
fn test_stale_term_after_switch_falls_back() {
    // A 30-year Pag-IBIG selection carried into Bank Financing without the
    // switch policy lands on the longest bank term.
    let table = PlanTable::default();
    let output = financing::analyze_affordability(&bank_input(30), &table).unwrap();
    let terms: Vec<u32> = output
        .result
        .amortization_ladder
        .iter()
        .map(|r| r.term_years)
        .collect();
    assert_eq!(terms, vec![20, 15, 10]);
    assert_eq!(output.warnings.len(), 1);

    // With the switch policy applied the selection is valid again.
    let mut form = FormState::default()
        .switch_financing(&table, PAG_IBIG_FINANCING)
        .unwrap();
    form.loan_term_years = 30;
    let form = form.switch_financing(&table, BANK_FINANCING).unwrap();
    assert_eq!(form.loan_term_years, 5);
    assert_eq!(form.interest_rate_percent, dec!(7.5));
    let result = compute(&form.to_input(), &table).unwrap();
    assert_eq!(result.amortization_ladder.len(), 1);
}
