//! Workbook reader: sheet enumeration and worksheet parsing.

use crate::container::Package;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

use super::cell::{parse_cell_ref, CellValue, Row, Sheet, MAX_ROWS};
use super::shared_strings::SharedStrings;
use super::styles::{serial_to_datetime, Styles};

/// Sheet entry from workbook.xml, with its worksheet part resolved.
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    part: Option<String>,
}

/// An opened `.xlsx` workbook.
///
/// Opening reads the workbook-level parts only; each worksheet is parsed on
/// demand by [`Workbook::read_sheet`], so one broken sheet does not prevent
/// reading the others.
pub struct Workbook {
    package: Package,
    shared_strings: SharedStrings,
    styles: Styles,
    sheets: Vec<SheetEntry>,
}

impl Workbook {
    /// Open a workbook file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let package = Package::open(path)?;
        Self::from_package(package)
    }

    /// Open a workbook from the bytes of an `.xlsx` file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let package = Package::from_bytes(data)?;
        Self::from_package(package)
    }

    fn from_package(package: Package) -> Result<Self> {
        let shared_strings = if package.contains("xl/sharedStrings.xml") {
            SharedStrings::parse(&package.read_xml("xl/sharedStrings.xml")?)?
        } else {
            SharedStrings::default()
        };

        let styles = match package.read_xml("xl/styles.xml") {
            Ok(xml) => Styles::parse(&xml),
            Err(_) => Styles::default(),
        };

        let relationships = match package.read_xml("xl/_rels/workbook.xml.rels") {
            Ok(xml) => parse_relationships(&xml)?,
            Err(_) => HashMap::new(),
        };

        let workbook_xml = package.read_xml("xl/workbook.xml")?;
        let sheets = parse_sheet_entries(&workbook_xml)?
            .into_iter()
            .map(|(name, rel_id)| SheetEntry {
                name,
                part: relationships.get(&rel_id).map(|t| resolve_target(t)),
            })
            .collect();

        Ok(Self {
            package,
            shared_strings,
            styles,
            sheets,
        })
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Read the sheet at `index` (workbook order).
    pub fn read_sheet(&self, index: usize) -> Result<Sheet> {
        let entry = self
            .sheets
            .get(index)
            .ok_or_else(|| Error::MissingComponent(format!("sheet #{}", index)))?;
        let part = entry.part.as_deref().ok_or_else(|| {
            Error::MissingComponent(format!("worksheet part for sheet '{}'", entry.name))
        })?;

        let xml = self.package.read_xml(part)?;
        let mut sheet = self.parse_worksheet(&xml)?;
        sheet.name = entry.name.clone();
        Ok(sheet)
    }

    /// Parse worksheet XML into positional rows.
    fn parse_worksheet(&self, xml: &str) -> Result<Sheet> {
        let mut sheet = Sheet::default();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut next_row = 0usize;
        let mut current: Option<(usize, Row)> = None;
        let mut next_col = 0usize;
        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_phonetic = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        let index = row_index(e, next_row)?;
                        current = Some((index, Row::default()));
                        next_row = index + 1;
                        next_col = 0;
                    }
                    b"c" if current.is_some() => {
                        let pending = PendingCell::from_start(e, next_col)?;
                        next_col = pending.column + 1;
                        cell = Some(pending);
                    }
                    b"rPh" => in_phonetic = true,
                    b"v" | b"t" if cell.is_some() && !in_phonetic => in_value = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        let index = row_index(e, next_row)?;
                        sheet.put_row(index, Row::default());
                        next_row = index + 1;
                    }
                    b"c" if current.is_some() => {
                        // Value-less cell, only styled
                        let pending = PendingCell::from_start(e, next_col)?;
                        next_col = pending.column + 1;
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_value {
                        if let Some(pending) = cell.as_mut() {
                            let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                            pending.raw.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        if let Some((index, row)) = current.take() {
                            sheet.put_row(index, row);
                        }
                    }
                    b"c" => {
                        if let (Some(pending), Some((_, row))) = (cell.take(), current.as_mut()) {
                            let column = pending.column;
                            row.set(column, self.resolve(pending)?);
                        }
                    }
                    b"rPh" => in_phonetic = false,
                    b"v" | b"t" => in_value = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Turn the raw `<v>`/`<t>` content of a cell into a typed value.
    fn resolve(&self, cell: PendingCell) -> Result<CellValue> {
        let PendingCell {
            kind, style, raw, ..
        } = cell;

        let value = match kind.as_deref() {
            _ if raw.is_empty() => CellValue::Empty,
            Some("s") => {
                let index: usize = raw.trim().parse().map_err(|_| {
                    Error::InvalidData(format!("bad shared string index '{}'", raw))
                })?;
                let text = self.shared_strings.get(index).ok_or_else(|| {
                    Error::InvalidData(format!("shared string index {} out of range", index))
                })?;
                CellValue::Text(text.to_string())
            }
            Some("str") | Some("inlineStr") => CellValue::Text(raw),
            Some("b") => CellValue::Bool(raw.trim() == "1"),
            Some("e") => CellValue::Empty,
            _ => match raw.trim().parse::<f64>() {
                Ok(n) if self.styles.is_date_style(style) => serial_to_datetime(n)
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Number(n)),
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::Text(raw),
            },
        };

        Ok(value)
    }
}

/// A `<c>` element being read.
struct PendingCell {
    column: usize,
    kind: Option<String>,
    style: usize,
    raw: String,
}

impl PendingCell {
    fn from_start(e: &BytesStart<'_>, default_column: usize) -> Result<Self> {
        let mut cell = Self {
            column: default_column,
            kind: None,
            style: 0,
            raw: String::new(),
        };

        for attr in e.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value);
            match attr.key.as_ref() {
                b"r" => cell.column = parse_cell_ref(&value)?.1,
                b"t" => cell.kind = Some(value.into_owned()),
                b"s" => cell.style = value.parse().unwrap_or(0),
                _ => {}
            }
        }

        Ok(cell)
    }
}

/// Zero-based index of a `<row>`; rows without `r` follow the previous one.
fn row_index(e: &BytesStart<'_>, default_index: usize) -> Result<usize> {
    let index = match e.attributes().flatten().find(|a| a.key.as_ref() == b"r") {
        Some(attr) => {
            let value = String::from_utf8_lossy(&attr.value);
            match value.trim().parse::<usize>() {
                Ok(n) if (1..=MAX_ROWS).contains(&n) => n - 1,
                _ => return Err(Error::InvalidData(format!("bad row number '{}'", value))),
            }
        }
        None => default_index,
    };

    if index >= MAX_ROWS {
        return Err(Error::InvalidData(format!(
            "row {} beyond the last worksheet row",
            index + 1
        )));
    }
    Ok(index)
}

/// Map a relationship target to a package part name.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

/// Parse `xl/_rels/workbook.xml.rels` into `Id -> Target`.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut rels = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut target = String::new();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).into_owned(),
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).into_owned()
                            }
                            _ => {}
                        }
                    }
                    if !id.is_empty() && !target.is_empty() {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Parse `xl/workbook.xml` into `(sheet name, relationship id)` pairs.
fn parse_sheet_entries(xml: &str) -> Result<Vec<(String, String)>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"sheet" {
                    let mut name = String::new();
                    let mut rel_id = String::new();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr
                                    .unescape_value()
                                    .map(|v| v.into_owned())
                                    .unwrap_or_else(|_| {
                                        String::from_utf8_lossy(&attr.value).into_owned()
                                    });
                            }
                            b"r:id" => rel_id = String::from_utf8_lossy(&attr.value).into_owned(),
                            _ => {}
                        }
                    }
                    if !name.is_empty() {
                        sheets.push((name, rel_id));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
