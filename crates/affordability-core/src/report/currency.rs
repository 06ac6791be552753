//! Peso and plain-number formatting for computation sheets.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

const PESO_SIGN: char = '₱';

/// Format as pesos with two decimals and thousands separators: `₱1,234.50`.
pub fn format_peso(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}{PESO_SIGN}{}.{cents}", group_thousands(whole))
}

/// Round up to the next whole peso before formatting. Used for
/// amortization and income figures so a buyer never sees an understated
/// amount.
pub fn format_peso_ceil(amount: Money) -> String {
    format_peso(amount.ceil())
}

fn group_thousands(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Decimal without trailing zeros, for percentages and areas: 20.00 -> "20".
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}
