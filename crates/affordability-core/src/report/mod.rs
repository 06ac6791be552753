//! Presentation support: the sample-computation sheet, peso formatting and
//! export file naming. Rendering the sheet to an image or PDF happens
//! outside this crate.

pub mod currency;
pub mod export;
pub mod sheet;

pub use currency::{format_peso, format_peso_ceil, format_plain};
pub use export::{ensure_exportable, export_file_name, financing_label, ExportFormat};
pub use sheet::{ComputationSheet, LadderLine, SheetLine};
