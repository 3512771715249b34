//! In-memory `.xlsx` packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A test cell value.
#[derive(Debug, Clone)]
pub enum Value {
    Text(&'static str),
    Number(f64),
}

pub use Value::{Number, Text};

/// How a sheet is stored in the package.
enum Part {
    /// Rows of optional cells; `None` leaves a gap.
    Rows(Vec<Vec<Option<Value>>>),
    /// Worksheet XML written verbatim.
    Raw(String),
    /// Listed in the workbook, but the worksheet part is absent.
    Missing,
}

/// Builds a minimal SpreadsheetML package.
#[derive(Default)]
pub struct XlsxBuilder {
    sheets: Vec<(String, Part)>,
    date_style: bool,
}

impl XlsxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, name: &str, rows: Vec<Vec<Option<Value>>>) -> Self {
        self.sheets.push((name.to_string(), Part::Rows(rows)));
        self
    }

    pub fn raw_sheet(mut self, name: &str, xml: &str) -> Self {
        self.sheets.push((name.to_string(), Part::Raw(xml.to_string())));
        self
    }

    pub fn missing_sheet(mut self, name: &str) -> Self {
        self.sheets.push((name.to_string(), Part::Missing));
        self
    }

    /// Add a stylesheet where cell style `s="1"` is a date format.
    pub fn with_date_style(mut self) -> Self {
        self.date_style = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut shared: Vec<&'static str> = Vec::new();
        let mut worksheets = Vec::new();

        for (index, (_, part)) in self.sheets.iter().enumerate() {
            let xml = match part {
                Part::Rows(rows) => Some(worksheet_xml(rows, &mut shared)),
                Part::Raw(xml) => Some(xml.clone()),
                Part::Missing => None,
            };
            worksheets.push((format!("xl/worksheets/sheet{}.xml", index + 1), xml));
        }

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();

            let mut put = |name: &str, content: &str| {
                zip.start_file(name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            };

            put("[Content_Types].xml", CONTENT_TYPES);
            put("xl/workbook.xml", &workbook_xml(&self.sheets));
            put("xl/_rels/workbook.xml.rels", &relationships_xml(self.sheets.len()));
            put("xl/sharedStrings.xml", &shared_strings_xml(&shared));
            if self.date_style {
                put("xl/styles.xml", DATE_STYLES);
            }
            for (name, xml) in &worksheets {
                if let Some(xml) = xml {
                    put(name, xml);
                }
            }

            zip.finish().unwrap();
        }
        buffer
    }
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

const DATE_STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14" applyNumberFormat="1"/></cellXfs>
</styleSheet>"#;

/// Worksheet XML with one row number far beyond the last worksheet row.
pub const HUGE_ROW_SHEET: &str = r#"<worksheet><sheetData><row r="99999999999999"><c><v>1</v></c></row></sheetData></worksheet>"#;

/// Worksheet XML whose first cell is date-styled with a serial past 9999-12-31.
pub const HUGE_DATE_SHEET: &str = r#"<worksheet><sheetData><row r="1"><c r="A1" s="1"><v>1e300</v></c></row></sheetData></worksheet>"#;

/// Worksheet XML with an inline string carrying a phonetic reading.
pub const PHONETIC_SHEET: &str = r#"<worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><r><t>Produto</t></r><rPh sb="0" eb="1"><t>セイヒン</t></rPh></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>Acetona</t><rPh><t>アセトン</t></rPh></is></c></row></sheetData></worksheet>"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (column % 26) as u8) as char);
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn workbook_xml(sheets: &[(String, Part)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    for (index, (name, _)) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(name),
            index + 1,
            index + 1
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn relationships_xml(count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for index in 1..=count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{index}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{index}.xml"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn shared_strings_xml(strings: &[&str]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    for s in strings {
        xml.push_str(&format!(
            r#"<si><t xml:space="preserve">{}</t></si>"#,
            escape(s)
        ));
    }
    xml.push_str("</sst>");
    xml
}

fn worksheet_xml(rows: &[Vec<Option<Value>>], shared: &mut Vec<&'static str>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        if row.iter().all(Option::is_none) {
            continue;
        }
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letters(c), r + 1);
            match cell {
                None => {}
                Some(Value::Text(text)) => {
                    let index = match shared.iter().position(|s| s == text) {
                        Some(index) => index,
                        None => {
                            shared.push(*text);
                            shared.len() - 1
                        }
                    };
                    xml.push_str(&format!(r#"<c r="{reference}" t="s"><v>{index}</v></c>"#));
                }
                Some(Value::Number(n)) => {
                    xml.push_str(&format!(r#"<c r="{reference}"><v>{n}</v></c>"#));
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Four title rows, as at the top of every FDU sheet.
pub fn title_rows() -> Vec<Vec<Option<Value>>> {
    vec![
        vec![None, None, Some(Text("SISTEMA DA GESTÃO INTEGRADA"))],
        vec![None, None, Some(Text("Controle e Distribuição das FDS"))],
        vec![],
        vec![
            Some(Text("Nº")),
            Some(Text("Produto")),
            Some(Text("Nome técnico")),
            Some(Text("Fabricante")),
        ],
    ]
}

/// A complete 13-column data row.
pub fn data_row(values: [Value; 13]) -> Vec<Option<Value>> {
    values.into_iter().map(Some).collect()
}
