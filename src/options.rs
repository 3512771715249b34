//! Import and analysis options.

use crate::layout::ColumnLayout;
use std::ops::RangeInclusive;

/// Spreadsheet read when no input is given.
pub const DEFAULT_INPUT: &str = "public/RS 4.4.6-11 - Controle e Distribuição das FDS  Rev-01.xlsx";

/// Importer output file.
pub const DEFAULT_IMPORT_OUTPUT: &str = "fdus_importacao.json";

/// Analyzer output file.
pub const DEFAULT_ANALYSIS_OUTPUT: &str = "analise_planilha_fdu.json";

/// Options for the importer.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Non-data rows at the top of every sheet
    pub header_rows: usize,

    /// Column position of each record field
    pub layout: ColumnLayout,

    /// Value of `arquivoUrl` until the real file is uploaded
    pub file_placeholder: String,

    /// Days ahead of the run for the generated expiry date
    pub expiry_days: RangeInclusive<i64>,

    /// Days before the run for the generated creation timestamp
    pub created_days: RangeInclusive<i64>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            header_rows: 4,
            layout: ColumnLayout::fdu_sheet(),
            file_placeholder: "placeholder".to_string(),
            expiry_days: 180..=365 * 3,
            created_days: 1..=365 * 2,
        }
    }
}

impl ImportOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of header rows skipped on every sheet.
    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Set the column layout.
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the placeholder file reference.
    pub fn with_file_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.file_placeholder = placeholder.into();
        self
    }

    /// Set the expiry window, in days after the run. Reversed bounds are
    /// swapped when the synthesizer is built.
    pub fn with_expiry_days(mut self, days: RangeInclusive<i64>) -> Self {
        self.expiry_days = days;
        self
    }

    /// Set the creation window, in days before the run.
    pub fn with_created_days(mut self, days: RangeInclusive<i64>) -> Self {
        self.created_days = days;
        self
    }
}

/// Options for the structure analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Rows sampled per sheet, after the header row
    pub sample_rows: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self { sample_rows: 10 }
    }
}

impl AnalyzeOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sampled rows.
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }
}
