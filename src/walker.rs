//! Walks every sheet of a workbook through the row mapper.

use crate::mapper::RowMapper;
use crate::options::ImportOptions;
use crate::record::FduRecord;
use crate::synth::Synthesizer;
use crate::workbook::{Sheet, Workbook};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::path::Path;

/// Drives the [`RowMapper`] over all data rows of all sheets.
#[derive(Debug)]
pub struct SheetWalker<R> {
    mapper: RowMapper<R>,
    header_rows: usize,
}

impl SheetWalker<ThreadRng> {
    /// Walker generating ids and dates from the thread RNG and wall clock.
    pub fn new(options: &ImportOptions) -> Self {
        Self::with_synthesizer(options, Synthesizer::from_clock(options))
    }
}

impl<R: Rng> SheetWalker<R> {
    /// Walker with an explicit synthesizer.
    pub fn with_synthesizer(options: &ImportOptions, synth: Synthesizer<R>) -> Self {
        Self {
            mapper: RowMapper::new(options, synth),
            header_rows: options.header_rows,
        }
    }

    /// Collect the records of every sheet, in sheet order then row order.
    ///
    /// A sheet that cannot be read is logged and contributes nothing.
    pub fn walk(&mut self, workbook: &Workbook) -> Vec<FduRecord> {
        let mut records = Vec::new();
        tracing::info!(sheets = workbook.sheet_count(), "walking workbook");

        for (index, name) in workbook.sheet_names().into_iter().enumerate() {
            match workbook.read_sheet(index) {
                Ok(sheet) => {
                    records.extend(self.walk_sheet(&sheet));
                    tracing::info!(sheet = name, total = records.len(), "records so far");
                }
                Err(e) => {
                    tracing::warn!(sheet = name, error = %e, "skipping unreadable sheet");
                }
            }
        }

        records
    }

    /// Map the data rows of one sheet, after its header rows.
    pub fn walk_sheet(&mut self, sheet: &Sheet) -> Vec<FduRecord> {
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (offset, row) in sheet.rows().iter().enumerate().skip(self.header_rows) {
            match self.mapper.map(row, &sheet.name) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    skipped += 1;
                    tracing::debug!(sheet = %sheet.name, row = offset + 1, ?reason, "row skipped");
                }
            }
        }

        tracing::info!(
            sheet = %sheet.name,
            accepted = records.len(),
            skipped,
            "sheet processed"
        );
        records
    }
}

/// Import every FDU record of the workbook at `path`.
///
/// A workbook that cannot be opened yields no records; the failure is logged.
pub fn import_file(path: impl AsRef<Path>, options: &ImportOptions) -> Vec<FduRecord> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "processing workbook");

    match Workbook::open(path) {
        Ok(workbook) => SheetWalker::new(options).walk(&workbook),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "cannot open workbook");
            Vec::new()
        }
    }
}
