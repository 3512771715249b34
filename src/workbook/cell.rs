//! Positional sheet model: cells, rows and sheets.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde_json::Value;

/// Rows in a worksheet.
pub const MAX_ROWS: usize = 1_048_576;

/// Columns in a worksheet (`A` to `XFD`).
pub const MAX_COLUMNS: usize = 16_384;

static MISSING: CellValue = CellValue::Empty;

/// A raw cell value as stored in the workbook.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value, a blank cell, or an error cell (`#N/A`, `#REF!`, ...).
    #[default]
    Empty,
    /// Shared, inline or formula string.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Number stored with a date/time number format.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Whether the cell carries no usable value. An empty string counts as
    /// missing, a whitespace-only string does not.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// The text content of the cell, if it is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce the cell to text. Missing cells become the empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Convert the cell to JSON. Missing cells become `null`.
    pub fn to_json(&self) -> Value {
        if self.is_missing() {
            return Value::Null;
        }
        match self {
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Number(n) if is_integral(*n) => Value::from(*n as i64),
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Bool(b) => Value::Bool(*b),
            other => Value::String(other.to_text()),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < 1e15
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        String::new()
    } else if is_integral(n) {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One physical sheet row, addressed by zero-based column position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    /// Create a row from cells laid out by position.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// The cell at `column`, or [`CellValue::Empty`] beyond the last cell.
    pub fn get(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    /// Place a value at `column`, padding any gap with empty cells.
    pub fn set(&mut self, column: usize, value: CellValue) {
        if self.cells.len() <= column {
            self.cells.resize(column + 1, CellValue::Empty);
        }
        self.cells[column] = value;
    }

    /// Number of positions up to and including the last stored cell.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Whether every cell of the row is missing.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_missing)
    }
}

/// A worksheet read into physical rows. Row `i` is spreadsheet row `i + 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Sheet name as written in the workbook, untrimmed.
    pub name: String,
    rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// All physical rows, including blank ones between data rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Widest row of the sheet.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Row::width).max().unwrap_or(0)
    }

    /// Place a row at its zero-based physical index.
    pub(crate) fn put_row(&mut self, index: usize, row: Row) {
        if self.rows.len() <= index {
            self.rows.resize(index + 1, Row::default());
        }
        self.rows[index] = row;
    }
}

/// Parse an A1-style cell reference into zero-based `(row, column)`.
pub fn parse_cell_ref(reference: &str) -> Result<(usize, usize)> {
    let invalid = || Error::InvalidData(format!("bad cell reference '{}'", reference));

    let split = reference
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || letters.len() > 3 {
        return Err(invalid());
    }

    let mut column = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        column = column * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    let row: usize = digits.parse().map_err(|_| invalid())?;
    if row == 0 || row > MAX_ROWS || column > MAX_COLUMNS {
        return Err(invalid());
    }

    Ok((row - 1, column - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1").unwrap(), (0, 0));
        assert_eq!(parse_cell_ref("M5").unwrap(), (4, 12));
        assert_eq!(parse_cell_ref("AA10").unwrap(), (9, 26));
        assert_eq!(parse_cell_ref("b2").unwrap(), (1, 1));
        assert_eq!(parse_cell_ref("XFD1048576").unwrap(), (1_048_575, 16_383));
    }

    #[test]
    fn test_parse_cell_ref_invalid() {
        for bad in [
            "",
            "A",
            "12",
            "A0",
            "A?1",
            "ABCD1",
            "A1B",
            "A1048577",
            "XFE1",
            "A99999999999999",
        ] {
            assert!(
                matches!(parse_cell_ref(bad), Err(Error::InvalidData(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_text() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::Number(1.0).to_text(), "1");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Bool(true).to_text(), "True");
        assert_eq!(CellValue::Text("GHS02".into()).to_text(), "GHS02");
    }

    #[test]
    fn test_to_json() {
        assert_eq!(CellValue::Empty.to_json(), Value::Null);
        assert_eq!(CellValue::Text(String::new()).to_json(), Value::Null);
        assert_eq!(CellValue::Number(3.0).to_json(), serde_json::json!(3));
        assert_eq!(CellValue::Number(-12.0).to_json(), serde_json::json!(-12));
        assert_eq!(CellValue::Number(2.5).to_json(), serde_json::json!(2.5));
        assert_eq!(CellValue::Number(1e300).to_json(), serde_json::json!(1e300));
        assert_eq!(CellValue::Bool(false).to_json(), Value::Bool(false));
    }

    #[test]
    fn test_row_positions() {
        let mut row = Row::default();
        row.set(2, CellValue::Text("x".into()));
        assert_eq!(row.width(), 3);
        assert!(row.get(0).is_missing());
        assert_eq!(row.get(2).as_str(), Some("x"));
        assert!(row.get(40).is_missing());
        assert!(!row.is_blank());
        assert!(Row::default().is_blank());
    }
}
