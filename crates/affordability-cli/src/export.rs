use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use affordability_core::report::{ensure_exportable, export_file_name, ComputationSheet, ExportFormat};

use crate::output::table::render_table;

/// Write a generated sheet into `dir` under the standard export file name.
///
/// `envelope` is the full command output; JSON exports keep all of it, CSV
/// and text exports render just the sheet.
pub fn write_sheet(
    dir: &Path,
    format: ExportFormat,
    sheet: &ComputationSheet,
    envelope: &Value,
    generated_on: NaiveDate,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    ensure_exportable(sheet.generation)?;

    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;
    let path = dir.join(export_file_name(
        &sheet.financing_type,
        generated_on,
        sheet.generation,
        format,
    ));

    let contents = match format {
        ExportFormat::Json => serde_json::to_string_pretty(envelope)?,
        ExportFormat::Csv => sheet_csv(sheet)?,
        ExportFormat::Txt => sheet_text(sheet)?,
    };

    fs::write(&path, contents)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    info!(path = %path.display(), format = %format, "exported computation sheet");
    Ok(path)
}

fn sheet_csv(sheet: &ComputationSheet) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["section", "label", "value"])?;
    wtr.write_record(["header", "Title", sheet.title.as_str()])?;
    for (section, label, value) in sheet.flatten() {
        wtr.write_record([section, label.as_str(), value.as_str()])?;
    }
    wtr.write_record(["footer", "Disclaimer", sheet.disclaimer.as_str()])?;
    let bytes = wtr.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}

fn sheet_text(sheet: &ComputationSheet) -> Result<String, Box<dyn std::error::Error>> {
    let body = render_table(&serde_json::json!({
        "property": serde_json::to_value(&sheet.property)?,
        "down_payment_summary": serde_json::to_value(&sheet.down_payment_summary)?,
        "loanable_amount": sheet.loanable_amount,
        "amortization": serde_json::to_value(&sheet.amortization)?,
    }));
    Ok(format!(
        "{}\nGeneration {}\n\n{}\n\"{}\"\n",
        sheet.title, sheet.generation, body, sheet.disclaimer
    ))
}
