use std::env;
use std::path::PathBuf;

use affordability_core::financing::PlanTable;
use tracing::debug;

use crate::input;

const PLANS_VAR: &str = "AFFORD_PLANS";
const STATE_VAR: &str = "AFFORD_STATE";
const LOG_VAR: &str = "AFFORD_LOG";
const STATE_FILE: &str = ".afford-state.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings resolved from flags, then environment (`.env` included), then
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Plan table file; the built-in Bank and Pag-IBIG plans when unset.
    pub plans_path: Option<String>,
    /// Where the generation counter is persisted.
    pub state_path: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    pub fn load(plans_flag: Option<String>, state_flag: Option<String>) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(plans_flag, state_flag, |key| env::var(key).ok())
    }

    fn resolve(
        plans_flag: Option<String>,
        state_flag: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let plans_path = plans_flag.or_else(|| lookup(PLANS_VAR)).filter(|p| !p.is_empty());

        let state_path = state_flag
            .or_else(|| lookup(STATE_VAR))
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| match lookup("HOME") {
                Some(home) => PathBuf::from(home).join(STATE_FILE),
                None => PathBuf::from(STATE_FILE),
            });

        let log_level = lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            plans_path,
            state_path,
            log_level,
        }
    }

    pub fn plan_table(&self) -> Result<PlanTable, Box<dyn std::error::Error>> {
        match &self.plans_path {
            Some(path) => {
                debug!(path = %path, "loading plan table");
                input::file::read_plan_table(path)
            }
            None => Ok(PlanTable::default()),
        }
    }
}
