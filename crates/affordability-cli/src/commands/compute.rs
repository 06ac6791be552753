use chrono::Local;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use affordability_core::financing::{
    analyze_affordability, ConstructionStatus, FormState, LotType, PlanTable,
};
use affordability_core::generation::{GenerationCounter, GenerationStore};
use affordability_core::report::{ComputationSheet, ExportFormat};

use crate::config::CliConfig;
use crate::export;
use crate::input;
use crate::store::JsonFileStore;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LotTypeArg {
    Inner,
    End,
    Corner,
}

impl From<LotTypeArg> for LotType {
    fn from(arg: LotTypeArg) -> Self {
        match arg {
            LotTypeArg::Inner => LotType::InnerLot,
            LotTypeArg::End => LotType::EndLot,
            LotTypeArg::Corner => LotType::CornerLot,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    PreSelling,
    Ongoing,
    Rfo,
}

impl From<StatusArg> for ConstructionStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::PreSelling => ConstructionStatus::PreSelling,
            StatusArg::Ongoing => ConstructionStatus::OngoingConstruction,
            StatusArg::Rfo => ConstructionStatus::ReadyForOccupancy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
    Txt,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Txt => ExportFormat::Txt,
        }
    }
}

/// Arguments for generating a sample computation
#[derive(Args)]
pub struct ComputeArgs {
    /// Path to a JSON form file; flags given alongside override its fields
    #[arg(long)]
    pub input: Option<String>,

    /// Total contract price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Financing type; switching resets the loan term and interest rate
    #[arg(long)]
    pub financing: Option<String>,

    /// Down payment as a percent of price (percent-of-price plans)
    #[arg(long)]
    pub dp_percent: Option<Decimal>,

    /// Down payment amount (fixed-amount plans)
    #[arg(long)]
    pub dp_amount: Option<Decimal>,

    /// Reservation fee deducted from the down payment
    #[arg(long)]
    pub reservation: Option<Decimal>,

    /// Months to spread the down payment over (1-36)
    #[arg(long)]
    pub dp_months: Option<u32>,

    /// Selected loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub project: Option<String>,

    #[arg(long)]
    pub house_model: Option<String>,

    /// Lot area in square metres
    #[arg(long)]
    pub lot_area: Option<Decimal>,

    #[arg(long, value_enum)]
    pub lot_type: Option<LotTypeArg>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Directory to write the computation sheet into
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    pub export_format: ExportFormatArg,
}

pub fn run_compute(args: ComputeArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let table = config.plan_table()?;

    let base: FormState = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FormState::default()
    };

    let form = apply_flags(base, &args, &table)?;
    form.validate()?;

    let mut counter = GenerationCounter::new(JsonFileStore::new(&config.state_path));
    let export_to: Option<(&Path, ExportFormat)> =
        args.export.as_deref().map(|dir| (dir, args.export_format.into()));
    generate(&form, &table, &mut counter, export_to)
}

/// Compute, build the numbered sheet and export it if asked. The generation
/// is persisted only once the sheet and its export exist.
fn generate<S: GenerationStore>(
    form: &FormState,
    table: &PlanTable,
    counter: &mut GenerationCounter<S>,
    export_to: Option<(&Path, ExportFormat)>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = table.get_plan(&form.financing_type)?;
    let analysis = analyze_affordability(&form.to_input(), table)?;
    let generation = counter.peek_next()?;

    let generated_at = Local::now().naive_local();
    let sheet = ComputationSheet::build(form, plan, &analysis.result, generation, generated_at);

    let mut value = json!({
        "result": sheet,
        "computation": analysis.result,
        "methodology": analysis.methodology,
        "assumptions": analysis.assumptions,
        "warnings": analysis.warnings,
        "metadata": analysis.metadata,
    });

    if let Some((dir, format)) = export_to {
        let path = export::write_sheet(dir, format, &sheet, &value, generated_at.date())?;
        value["exported_to"] = json!(path.display().to_string());
    }

    counter.advance()?;
    Ok(value)
}

/// Layer command-line flags over a base form. A financing change goes
/// through the switch policy first, so an explicit `--term`/`--rate` still
/// wins over the plan defaults.
fn apply_flags(
    base: FormState,
    args: &ComputeArgs,
    table: &PlanTable,
) -> Result<FormState, Box<dyn std::error::Error>> {
    let mut form = match args.financing {
        Some(ref financing) if *financing != base.financing_type => {
            base.switch_financing(table, financing)?
        }
        _ => base,
    };

    if let Some(price) = args.price {
        form.price = price;
    }
    if let Some(percent) = args.dp_percent {
        form.down_payment_percent = percent;
    }
    if let Some(amount) = args.dp_amount {
        form.down_payment_amount = amount;
    }
    if let Some(fee) = args.reservation {
        form.reservation_fee = fee;
    }
    if let Some(months) = args.dp_months {
        form.down_payment_term_months = months;
    }
    if let Some(term) = args.term {
        form.loan_term_years = term;
    }
    if let Some(rate) = args.rate {
        form.interest_rate_percent = rate;
    }
    if let Some(ref project) = args.project {
        form.property.project_name = project.clone();
    }
    if let Some(ref model) = args.house_model {
        form.property.house_model = model.clone();
    }
    if let Some(area) = args.lot_area {
        form.property.lot_area = Some(area);
    }
    if let Some(lot_type) = args.lot_type {
        form.property.lot_type = lot_type.into();
    }
    if let Some(status) = args.status {
        form.property.construction_status = status.into();
    }

    Ok(form)
}
