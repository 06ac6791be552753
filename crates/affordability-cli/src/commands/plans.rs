use clap::Args;
use serde_json::{json, Value};

use affordability_core::financing::engine::ladder_terms;
use affordability_core::financing::on_financing_change;

use crate::config::CliConfig;

/// Arguments for listing financing plans
#[derive(Args)]
pub struct PlansArgs {}

/// Arguments for previewing a financing-type switch
#[derive(Args)]
pub struct SwitchPlanArgs {
    /// Financing type to switch to (e.g. "Pag-IBIG Financing")
    #[arg(long)]
    pub financing: String,
}

pub fn run_plans(_args: PlansArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let table = config.plan_table()?;
    Ok(json!({ "result": table.plans() }))
}

pub fn run_switch_plan(
    args: SwitchPlanArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let table = config.plan_table()?;
    let plan = table.get_plan(&args.financing)?;
    let selection = on_financing_change(plan);

    Ok(json!({
        "result": {
            "financing_type": plan.name,
            "term_years": selection.term_years,
            "interest_rate_percent": selection.interest_rate_percent,
            "down_payment_model": plan.down_payment_model,
            "available_terms": plan.terms,
            "ladder_terms": ladder_terms(plan, selection.term_years),
        }
    }))
}
