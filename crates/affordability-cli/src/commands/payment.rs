use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use affordability_core::amortization;

/// Arguments for a single monthly-payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount financed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 7.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub term: u32,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.principal < Decimal::ZERO {
        return Err("--principal must be non-negative".into());
    }
    if args.rate < Decimal::ZERO {
        return Err("--rate must be non-negative".into());
    }

    Ok(json!({
        "result": {
            "principal": args.principal,
            "annual_rate_percent": args.rate,
            "term_years": args.term,
            "monthly_payment": amortization::monthly_payment(args.principal, args.rate, args.term),
            "total_repayment": amortization::total_repayment(args.principal, args.rate, args.term),
            "total_interest": amortization::total_interest(args.principal, args.rate, args.term),
        },
        "methodology": "Fixed-rate annuity payment",
    }))
}
