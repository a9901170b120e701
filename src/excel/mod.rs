//! Excel workbook I/O
//!
//! - Import: workbook (.xlsx, .xls, .ods, ...) → [`crate::types::Sheet`]
//! - Export: [`crate::types::Sheet`]s → new .xlsx workbook

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
