//! Sheet structure sampling for manual inspection.
//!
//! Unlike the importer, missing cells (and the "nan"/"n.a" markers) are
//! reported as JSON `null`, and a sheet that cannot be read is recorded as an
//! `erro` entry instead of being dropped.

use crate::error::Result;
use crate::options::AnalyzeOptions;
use crate::record::is_null_marker;
use crate::workbook::{CellValue, Sheet, Workbook};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Summary of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSummary {
    /// The sheet was read.
    Sampled {
        /// Column names taken from the first row
        colunas: Vec<String>,
        /// First rows after the header, keyed by column name
        amostra: Vec<Map<String, Value>>,
        /// Rows after the header with at least one value
        total_linhas: usize,
    },
    /// The sheet could not be read.
    Failed {
        /// Why reading failed
        erro: String,
    },
}

/// Summaries of all sheets, serialized as an object keyed by sheet name in
/// workbook order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureReport {
    sheets: Vec<(String, SheetSummary)>,
}

impl StructureReport {
    /// Summary of the sheet called `name`.
    pub fn get(&self, name: &str) -> Option<&SheetSummary> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, summary)| summary)
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(name, _)| name.as_str())
    }

    /// Number of sheets in the report.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether the report has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Number of sheets that failed to read.
    pub fn failures(&self) -> usize {
        self.sheets
            .iter()
            .filter(|(_, s)| matches!(s, SheetSummary::Failed { .. }))
            .count()
    }
}

impl Serialize for StructureReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for (name, summary) in &self.sheets {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

/// Summarize a sheet: header names, sampled rows and the non-blank row count.
pub fn sample_sheet(sheet: &Sheet, options: &AnalyzeOptions) -> SheetSummary {
    let rows = sheet.rows();
    let colunas = column_names(sheet);

    let body = rows.get(1..).unwrap_or_default();
    let amostra: Vec<Map<String, Value>> = body
        .iter()
        .take(options.sample_rows)
        .map(|row| {
            colunas
                .iter()
                .enumerate()
                .map(|(position, name)| (name.clone(), cell_json(row.get(position))))
                .collect()
        })
        .collect();
    let total_linhas = body.iter().filter(|row| !row.is_blank()).count();

    SheetSummary::Sampled {
        colunas,
        amostra,
        total_linhas,
    }
}

/// Summarize every sheet of a workbook.
pub fn analyze_workbook(workbook: &Workbook, options: &AnalyzeOptions) -> StructureReport {
    let sheets = workbook
        .sheet_names()
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let summary = match workbook.read_sheet(index) {
                Ok(sheet) => sample_sheet(&sheet, options),
                Err(e) => {
                    tracing::warn!(sheet = name, error = %e, "sheet could not be analyzed");
                    SheetSummary::Failed {
                        erro: e.to_string(),
                    }
                }
            };
            (name.to_string(), summary)
        })
        .collect();

    StructureReport { sheets }
}

/// Open the workbook at `path` and summarize it.
pub fn analyze_file(path: impl AsRef<Path>, options: &AnalyzeOptions) -> Result<StructureReport> {
    let workbook = Workbook::open(path)?;
    Ok(analyze_workbook(&workbook, options))
}

/// Header names from the first row. Blank headers become `Unnamed: N`;
/// repeated names get `.1`, `.2`, ... suffixes.
fn column_names(sheet: &Sheet) -> Vec<String> {
    let header = sheet.rows().first();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(sheet.width());

    for position in 0..sheet.width() {
        let cell = header.map(|row| row.get(position));
        let base = match cell {
            Some(cell) if !cell.is_missing() => cell.to_text(),
            _ => format!("Unnamed: {}", position),
        };

        let mut name = base.clone();
        while let Some(count) = seen.get_mut(&name) {
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        seen.insert(name.clone(), 0);
        names.push(name);
    }

    names
}

fn cell_json(cell: &CellValue) -> Value {
    match cell.to_json() {
        Value::String(s) if is_null_marker(&s) => Value::Null,
        value => value,
    }
}
