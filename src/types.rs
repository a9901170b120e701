use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single typed spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// Excel serial date-time (days since 1899-12-30)
    DateTime(f64),
    /// Error code as displayed by Excel, e.g. `#N/A`
    Error(String),
}

impl CellValue {
    /// Coerce the cell to text.
    ///
    /// Integral floats render without a fractional part so that a collector
    /// number stored as `42.0` compares equal to the text `"42"`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) | CellValue::DateTime(f) => format_float(*f),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

//==============================================================================
// Sheets
//==============================================================================

/// A worksheet read as a header row plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Unique column names used for lookups
    pub headers: Vec<String>,
    /// Header row as it appeared in the source workbook. Written back in
    /// place of `headers` so blank and repeated headers survive a round trip.
    pub header_cells: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create an empty sheet with the given headers
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            header_cells: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Keep the raw header row alongside the derived column names
    pub fn with_header_cells(mut self, header_cells: Vec<CellValue>) -> Self {
        self.header_cells = header_cells;
        self
    }

    /// Header as it should be written: the source cell when there is one,
    /// otherwise the column name
    pub fn header_cell(&self, col: usize) -> CellValue {
        match self.header_cells.get(col) {
            Some(cell) => cell.clone(),
            None => self
                .headers
                .get(col)
                .map(|h| CellValue::Text(h.clone()))
                .unwrap_or(CellValue::Empty),
        }
    }

    /// Add a data row, padding it with empty cells up to the header width
    pub fn add_row(&mut self, mut row: Vec<CellValue>) {
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), CellValue::Empty);
        }
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Like [`Sheet::column_index`], but a missing column is an error
    pub fn require_column(&self, column: &str) -> crate::MapperResult<usize> {
        self.column_index(column)
            .ok_or_else(|| crate::MapperError::ColumnNotFound {
                column: column.to_string(),
                sheet: self.name.clone(),
            })
    }

    /// Cell at (row, col); cells past the end of a short row read as empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Append a column, or replace its values if a column with that name exists.
    ///
    /// `values` must hold one entry per data row.
    pub fn set_column(&mut self, column: &str, values: Vec<CellValue>) {
        let idx = match self.column_index(column) {
            Some(idx) => idx,
            None => {
                self.headers.push(column.to_string());
                self.headers.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() <= idx {
                row.resize(idx + 1, CellValue::Empty);
            }
            row[idx] = value;
        }
    }
}
