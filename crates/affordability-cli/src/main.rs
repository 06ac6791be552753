mod commands;
mod config;
mod export;
mod input;
mod output;
mod store;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compute::ComputeArgs;
use commands::payment::PaymentArgs;
use commands::plans::{PlansArgs, SwitchPlanArgs};
use commands::reset::ResetArgs;
use config::CliConfig;

/// Real-estate affordability calculator
#[derive(Parser)]
#[command(
    name = "afford",
    version,
    about = "Real-estate affordability calculator",
    long_about = "Computes down-payment schedules, monthly amortization and minimum \
                  qualifying income for a property purchase under Bank or Pag-IBIG \
                  financing, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Financing plan table (.json, .yaml or .yml); overrides AFFORD_PLANS
    #[arg(long, global = true)]
    plans: Option<String>,

    /// Generation counter file; overrides AFFORD_STATE
    #[arg(long, global = true)]
    state: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sample computation: down payment, loanable amount, amortization ladder
    Compute(ComputeArgs),
    /// Monthly payment for a single principal, rate and term
    Payment(PaymentArgs),
    /// List the financing plans in effect
    Plans(PlansArgs),
    /// Show the term and rate selected when switching financing type
    SwitchPlan(SwitchPlanArgs),
    /// Clear the generation counter and show the default form
    Reset(ResetArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.plans, cli.state);

    if let Err(e) = telemetry::init(&config.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compute(args) => commands::compute::run_compute(args, &config),
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Plans(args) => commands::plans::run_plans(args, &config),
        Commands::SwitchPlan(args) => commands::plans::run_switch_plan(args, &config),
        Commands::Reset(args) => commands::reset::run_reset(args, &config),
        Commands::Version => {
            println!("afford {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
