//! JSON output.

use crate::error::Result;
use crate::record::FduRecord;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialize `value` as pretty JSON: 2-space indentation, non-ASCII kept
/// as literal UTF-8.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let json = to_json(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the records as a JSON array and return how many were written.
pub fn write_records(path: impl AsRef<Path>, records: &[FduRecord]) -> Result<usize> {
    write_json(path, records)?;
    Ok(records.len())
}
