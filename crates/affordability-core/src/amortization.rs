//! Fixed-rate, fixed-term amortization math.
//!
//! Every function here is total: zero terms, zero rates and numerically
//! degenerate rates have defined fallbacks instead of errors, and results
//! too large for a `Decimal` saturate at `Decimal::MAX`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage (7.5) into a monthly periodic rate (0.00625).
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Level monthly payment that retires `principal` over `term_years`.
///
/// `P * m(1+m)^n / ((1+m)^n - 1)` with `m` the monthly rate and `n` the
/// number of monthly periods. A zero term pays nothing, a zero rate is
/// straight-line, and a denominator that rounds to exactly zero falls back
/// to straight-line as well. If `(1+m)^n` leaves the decimal range the
/// payment is its limit, `P * m`. Any product past the decimal range
/// saturates at `Decimal::MAX`.
pub fn monthly_payment(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Money {
    let periods = term_years.saturating_mul(MONTHS_PER_YEAR);
    if periods == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(periods);

    if annual_rate_percent.is_zero() {
        return principal / n;
    }

    let m = monthly_rate(annual_rate_percent);
    let Some(compound) = (Decimal::ONE + m).checked_powu(u64::from(periods)) else {
        return principal.saturating_mul(m);
    };

    let denominator = compound - Decimal::ONE;
    let Some(growth) = compound.checked_div(denominator) else {
        return principal / n;
    };

    // growth stays near 1 for long terms, so this holds where
    // principal * m * compound would overflow.
    principal.saturating_mul(m).saturating_mul(growth)
}

/// Sum of all monthly payments over the term, saturating at `Decimal::MAX`.
pub fn total_repayment(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Money {
    monthly_payment(principal, annual_rate_percent, term_years)
        .saturating_mul(Decimal::from(term_years.saturating_mul(MONTHS_PER_YEAR)))
}

/// Interest paid over the life of the loan.
pub fn total_interest(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Money {
    total_repayment(principal, annual_rate_percent, term_years) - principal
}
