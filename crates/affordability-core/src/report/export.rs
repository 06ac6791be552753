//! Export formats, file naming and the export readiness check.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AffordabilityError;
use crate::AffordabilityResult;

/// File formats a computation sheet can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Exports only make sense once a sheet has been generated.
pub fn ensure_exportable(generation: u64) -> AffordabilityResult<()> {
    if generation == 0 {
        return Err(AffordabilityError::ExportNotReady);
    }
    Ok(())
}

/// Financing name without a trailing "Financing": "Pag-IBIG Financing" -> "Pag-IBIG".
pub fn financing_label(financing_type: &str) -> String {
    const SUFFIX: &str = "financing";
    let trimmed = financing_type.trim_end();
    let split = trimmed.len().saturating_sub(SUFFIX.len());
    match (trimmed.get(..split), trimmed.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(SUFFIX) => head.trim().to_string(),
        _ => trimmed.trim().to_string(),
    }
}

/// `Sample Computation - <label> - <MMDDYYYY> - <generation>.<ext>`
pub fn export_file_name(
    financing_type: &str,
    generated_on: NaiveDate,
    generation: u64,
    format: ExportFormat,
) -> String {
    format!(
        "Sample Computation - {} - {} - {}.{}",
        financing_label(financing_type),
        generated_on.format("%m%d%Y"),
        generation.max(1),
        format.extension()
    )
}
