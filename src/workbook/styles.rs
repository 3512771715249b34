//! Cell styles (`xl/styles.xml`), used only to recognise date cells.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Number format information for each cell style index.
#[derive(Debug, Default)]
pub struct Styles {
    /// Custom number formats: numFmtId -> formatCode
    num_fmts: HashMap<u32, String>,
    /// Cell formats: style index -> numFmtId
    cell_xfs: Vec<u32>,
}

impl Styles {
    /// Parse styles. A malformed stylesheet yields whatever was read so far,
    /// cells then simply keep their numeric value.
    pub fn parse(xml: &str) -> Self {
        let mut styles = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut in_num_fmts = false;
        let mut in_cell_xfs = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"numFmts" => in_num_fmts = true,
                    b"cellXfs" => in_cell_xfs = true,
                    b"xf" if in_cell_xfs => styles.cell_xfs.push(num_fmt_id(e).unwrap_or(0)),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"numFmt" if in_num_fmts => {
                        if let Some(id) = num_fmt_id(e) {
                            let code = e
                                .attributes()
                                .flatten()
                                .find(|a| a.key.as_ref() == b"formatCode")
                                .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
                                .unwrap_or_default();
                            styles.num_fmts.insert(id, code);
                        }
                    }
                    b"xf" if in_cell_xfs => styles.cell_xfs.push(num_fmt_id(e).unwrap_or(0)),
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"numFmts" => in_num_fmts = false,
                    b"cellXfs" => in_cell_xfs = false,
                    _ => {}
                },
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        styles
    }

    /// Whether the cell style at `style_index` formats numbers as dates.
    pub fn is_date_style(&self, style_index: usize) -> bool {
        self.cell_xfs
            .get(style_index)
            .is_some_and(|&id| self.is_date_format(id))
    }

    fn is_date_format(&self, num_fmt_id: u32) -> bool {
        // 14-22 dates, 45-47 times
        if (14..=22).contains(&num_fmt_id) || (45..=47).contains(&num_fmt_id) {
            return true;
        }

        self.num_fmts
            .get(&num_fmt_id)
            .is_some_and(|code| is_date_format_code(code))
    }
}

fn num_fmt_id(e: &BytesStart<'_>) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"numFmtId")
        .and_then(|a| String::from_utf8_lossy(&a.value).parse().ok())
}

/// A format code is a date format when it has d/m/y tokens outside of
/// `[...]` sections and quoted literals.
fn is_date_format_code(format_code: &str) -> bool {
    let mut in_bracket = false;
    let mut in_quote = false;
    let mut escaped = false;

    for c in format_code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            '[' if !in_quote => in_bracket = true,
            ']' if !in_quote => in_bracket = false,
            _ if in_bracket || in_quote => {}
            'd' | 'D' | 'y' | 'Y' | 'm' | 'M' => return true,
            _ => {}
        }
    }

    false
}

/// Serial of 9999-12-31, the last date a workbook can hold.
const MAX_SERIAL: f64 = 2_958_465.0;

/// Convert an Excel 1900-system serial number to a date-time.
///
/// Serial 60 is the non-existent 1900-02-29; serials below it are shifted by
/// one day so that serial 1 is 1900-01-01. Serials outside 1..=9999-12-31
/// give `None`.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(1.0..MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }

    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let days = serial.floor() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_days(days)?)?
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_date_styles() {
        let xml = r#"<styleSheet>
  <cellXfs count="3">
    <xf numFmtId="0"/>
    <xf numFmtId="14"/>
    <xf numFmtId="2"/>
  </cellXfs>
</styleSheet>"#;
        let styles = Styles::parse(xml);
        assert!(!styles.is_date_style(0));
        assert!(styles.is_date_style(1));
        assert!(!styles.is_date_style(2));
        assert!(!styles.is_date_style(9));
    }

    #[test]
    fn test_custom_date_style() {
        let xml = r#"<styleSheet>
  <numFmts count="2">
    <numFmt numFmtId="164" formatCode="dd/mm/yyyy"/>
    <numFmt numFmtId="165" formatCode="&quot;R$&quot;\ #,##0.00"/>
  </numFmts>
  <cellXfs count="2">
    <xf numFmtId="164" applyNumberFormat="1"><alignment/></xf>
    <xf numFmtId="165"/>
  </cellXfs>
</styleSheet>"#;
        let styles = Styles::parse(xml);
        assert!(styles.is_date_style(0));
        assert!(!styles.is_date_style(1));
    }

    #[test]
    fn test_date_format_codes() {
        assert!(is_date_format_code("yyyy-mm-dd"));
        assert!(is_date_format_code("[$-416]d/m/yy;@"));
        assert!(!is_date_format_code("0.00"));
        assert!(!is_date_format_code("#,##0"));
        assert!(!is_date_format_code("[Red]0.00"));
        assert!(!is_date_format_code("\"dias\" 0"));
    }

    #[test]
    fn test_serial_to_datetime() {
        let date = |s: f64| serial_to_datetime(s).map(|d| d.to_string());
        assert_eq!(date(1.0).as_deref(), Some("1900-01-01 00:00:00"));
        assert_eq!(date(59.0).as_deref(), Some("1900-02-28 00:00:00"));
        assert_eq!(date(61.0).as_deref(), Some("1900-03-01 00:00:00"));
        assert_eq!(date(44197.0).as_deref(), Some("2021-01-01 00:00:00"));
        assert_eq!(date(45658.5).as_deref(), Some("2025-01-01 12:00:00"));
        assert_eq!(date(0.0), None);
        assert_eq!(date(2_958_465.0).as_deref(), Some("9999-12-31 00:00:00"));
    }

    #[test]
    fn test_serial_out_of_range() {
        for serial in [2_958_466.0, 1e15, 1e300, f64::MAX, f64::INFINITY, f64::NAN, -5.0] {
            assert_eq!(serial_to_datetime(serial), None, "{serial}");
        }
    }
}
