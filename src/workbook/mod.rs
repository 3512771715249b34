//! XLSX workbook reading.
//!
//! Sheets are read into a positional grid: every cell sits at the column its
//! `r` reference names, and blank physical rows are kept, so fixed column
//! layouts and header offsets line up with what a spreadsheet user sees.
//!
//! # Example
//!
//! ```no_run
//! use fdu_import::workbook::Workbook;
//!
//! let workbook = Workbook::open("inventario.xlsx")?;
//! for (index, name) in workbook.sheet_names().iter().enumerate() {
//!     let sheet = workbook.read_sheet(index)?;
//!     println!("{}: {} rows", name, sheet.rows().len());
//! }
//! # Ok::<(), fdu_import::Error>(())
//! ```

mod cell;
mod reader;
mod shared_strings;
mod styles;

pub use cell::{parse_cell_ref, CellValue, Row, Sheet};
pub use reader::Workbook;
