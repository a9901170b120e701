//! Excel importer implementation - workbook → [`Sheet`]

use crate::error::{MapperError, MapperResult};
use crate::types::{CellValue, Sheet};
use calamine::{
    open_workbook_auto, Data, OdsError, Range, Reader, Sheets, XlsError, XlsbError, XlsxError,
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads named worksheets from an open workbook
pub struct ExcelImporter {
    workbook: Sheets<BufReader<File>>,
}

impl ExcelImporter {
    /// Open a workbook (.xlsx, .xlsm, .xlsb, .xls or .ods)
    pub fn open<P: AsRef<Path>>(path: P) -> MapperResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(MapperError::FileNotFound(path.to_path_buf()));
        }

        let workbook = open_workbook_auto(path).map_err(|e| open_error(path, e))?;
        debug!(path = %path.display(), "opened workbook");

        Ok(Self { workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Read a worksheet; its first row becomes the header
    pub fn read_sheet(&mut self, name: &str) -> MapperResult<Sheet> {
        let available = self.sheet_names();
        if !available.iter().any(|s| s == name) {
            return Err(MapperError::SheetNotFound {
                sheet: name.to_string(),
                available,
            });
        }

        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| MapperError::Format(format!("Failed to read sheet '{}': {}", name, e)))?;

        let sheet = sheet_from_range(name, &range);
        debug!(
            sheet = name,
            columns = sheet.headers.len(),
            rows = sheet.row_count(),
            "read sheet"
        );
        Ok(sheet)
    }
}

/// Unreadable files are I/O errors; anything else calamine rejects is a
/// format problem
fn open_error(path: &Path, err: calamine::Error) -> MapperError {
    match err {
        calamine::Error::Io(e)
        | calamine::Error::Xlsx(XlsxError::Io(e))
        | calamine::Error::Xls(XlsError::Io(e))
        | calamine::Error::Xlsb(XlsbError::Io(e))
        | calamine::Error::Ods(OdsError::Io(e)) => MapperError::Io(e),
        other => MapperError::Format(format!("Failed to open {}: {}", path.display(), other)),
    }
}

/// Convert a calamine range to a [`Sheet`].
///
/// The range begins at the first used cell, so rows are padded back out to
/// column A. Leading blank rows are skipped: the header is the first used row.
fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let first_col = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows().map(|row| {
        std::iter::repeat(CellValue::Empty)
            .take(first_col)
            .chain(row.iter().map(convert_cell))
            .collect::<Vec<_>>()
    });

    let header_cells = match rows.next() {
        Some(header_row) => header_row,
        None => return Sheet::new(name, Vec::new()),
    };

    let mut sheet = Sheet::new(name, header_names(&header_cells)).with_header_cells(header_cells);
    for row in rows {
        sheet.add_row(row);
    }
    sheet
}

/// Header text for each column. Blank headers become `Unnamed: <index>` and
/// repeats of a name get `.1`, `.2`, ... suffixes so every header is unique.
fn header_names(row: &[CellValue]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(row.len());

    for (idx, cell) in row.iter().enumerate() {
        let base = match cell {
            CellValue::Empty => format!("Unnamed: {}", idx),
            value => value.to_text(),
        };

        let mut name = base.clone();
        if let Some(mut n) = counts.get(&base).copied() {
            loop {
                n += 1;
                name = format!("{}.{}", base, n);
                if !counts.contains_key(&name) {
                    break;
                }
            }
            counts.insert(base, n);
        }
        counts.entry(name.clone()).or_insert(0);
        headers.push(name);
    }

    headers
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
