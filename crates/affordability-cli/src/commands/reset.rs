use clap::Args;
use serde_json::{json, Value};

use affordability_core::financing::FormState;
use affordability_core::generation::GenerationCounter;

use crate::config::CliConfig;
use crate::store::JsonFileStore;

/// Arguments for resetting the form and generation counter
#[derive(Args)]
pub struct ResetArgs {}

pub fn run_reset(_args: ResetArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let mut counter = GenerationCounter::new(JsonFileStore::new(&config.state_path));
    counter.reset()?;

    Ok(json!({
        "result": {
            "generation": counter.current()?,
            "defaults": FormState::default(),
        }
    }))
}
