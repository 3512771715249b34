//! # fdu-import
//!
//! Converts the "Controle e Distribuição das FDS" spreadsheet, one sheet per
//! sector, into FDU (safety data sheet) records ready for bulk import, and
//! samples the structure of its sheets for inspection.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fdu_import::{import_file, ImportOptions};
//!
//! let records = import_file("public/fds.xlsx", &ImportOptions::default());
//! println!("{} FDUs found", records.len());
//! fdu_import::export::write_records("fdus_importacao.json", &records)?;
//! # Ok::<(), fdu_import::Error>(())
//! ```
//!
//! ## Structure Analysis
//!
//! ```no_run
//! use fdu_import::{analyze_file, AnalyzeOptions};
//!
//! let report = analyze_file("public/fds.xlsx", &AnalyzeOptions::default())?;
//! fdu_import::export::write_json("analise_planilha_fdu.json", &report)?;
//! # Ok::<(), fdu_import::Error>(())
//! ```

pub mod analyze;
pub mod container;
pub mod error;
pub mod export;
pub mod layout;
pub mod mapper;
pub mod options;
pub mod record;
pub mod synth;
pub mod walker;
pub mod workbook;

// Re-exports
pub use analyze::{analyze_file, analyze_workbook, SheetSummary, StructureReport};
pub use error::{Error, Result};
pub use layout::{ColumnLayout, Field};
pub use mapper::{Rejection, RowMapper};
pub use options::{
    AnalyzeOptions, ImportOptions, DEFAULT_ANALYSIS_OUTPUT, DEFAULT_IMPORT_OUTPUT, DEFAULT_INPUT,
};
pub use record::FduRecord;
pub use synth::Synthesizer;
pub use walker::{import_file, SheetWalker};
pub use workbook::{CellValue, Row, Sheet, Workbook};
