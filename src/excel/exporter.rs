//! Excel exporter implementation - [`Sheet`]s → .xlsx

use crate::error::{MapperError, MapperResult};
use crate::types::{CellValue, Sheet};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Writes sheets to a new workbook, in the order given
pub struct ExcelExporter<'a> {
    sheets: Vec<&'a Sheet>,
    header_format: Format,
    cell_format: Format,
    datetime_format: Format,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(sheets: Vec<&'a Sheet>) -> Self {
        Self {
            sheets,
            header_format: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            cell_format: Format::new(),
            datetime_format: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }

    /// Build the whole workbook in memory, then save it to `output_path`,
    /// creating or overwriting the file
    pub fn export(&self, output_path: &Path) -> MapperResult<()> {
        let mut workbook = Workbook::new();

        for sheet in &self.sheets {
            self.export_sheet(&mut workbook, sheet)?;
        }

        workbook
            .save(output_path)
            .map_err(|e| MapperError::Export(format!("Failed to save Excel file: {}", e)))?;
        debug!(path = %output_path.display(), sheets = self.sheets.len(), "saved workbook");

        Ok(())
    }

    fn export_sheet(&self, workbook: &mut Workbook, sheet: &Sheet) -> MapperResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| MapperError::Export(format!("Invalid sheet name '{}': {}", sheet.name, e)))?;

        for col_idx in 0..sheet.headers.len() {
            let header = sheet.header_cell(col_idx);
            self.write_cell(worksheet, 0, Self::column(col_idx)?, &header, &self.header_format)?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let excel_row = u32::try_from(row_idx + 1).map_err(|_| {
                MapperError::Export(format!("Sheet '{}' has too many rows", sheet.name))
            })?;
            for (col_idx, value) in row.iter().enumerate() {
                let col = Self::column(col_idx)?;
                self.write_cell(worksheet, excel_row, col, value, &self.cell_format)?;
            }
        }

        Ok(())
    }

    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        format: &Format,
    ) -> MapperResult<()> {
        let result = match value {
            CellValue::Empty => return Ok(()),
            CellValue::Int(i) => worksheet.write_number_with_format(row, col, *i as f64, format),
            CellValue::Float(f) => worksheet.write_number_with_format(row, col, *f, format),
            CellValue::Text(s) | CellValue::Error(s) => {
                worksheet.write_string_with_format(row, col, s, format)
            }
            CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, format),
            CellValue::DateTime(serial) => {
                worksheet.write_number_with_format(row, col, *serial, &self.datetime_format)
            }
        };

        result.map_err(|e| {
            MapperError::Export(format!(
                "Failed to write cell at row {}, column {}: {}",
                row + 1,
                col + 1,
                e
            ))
        })?;
        Ok(())
    }

    fn column(idx: usize) -> MapperResult<u16> {
        u16::try_from(idx).map_err(|_| MapperError::Export(format!("Column {} out of range", idx)))
    }
}
