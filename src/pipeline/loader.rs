use std::collections::HashSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use super::table::{unique_name, Table, Value};
use super::PipelineError;

/// Load a CSV snapshot, degrading to the empty table on any failure
///
/// A missing file is expected (snapshots are refreshed out-of-band) and only
/// logged as a warning. Other failures are logged as errors.
pub fn load(path: impl AsRef<Path>) -> Table {
    let path = path.as_ref();

    match try_load(path) {
        Ok(table) => {
            tracing::debug!("Loaded {} rows from {:?}", table.len(), path);
            table
        }
        Err(PipelineError::SourceMissing(_)) => {
            tracing::warn!("File not found: {:?}", path);
            Table::empty()
        }
        Err(e) => {
            tracing::error!("Failed to load {:?}: {}", path, e);
            Table::empty()
        }
    }
}

/// Load a CSV snapshot, reporting why it could not be read
pub fn try_load(path: impl AsRef<Path>) -> Result<Table, PipelineError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::SourceMissing(path.to_path_buf()),
        _ => PipelineError::Io(e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    // Repeated headers become `name.1`, `name.2`, ...
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for name in reader.headers()?.iter() {
        let name = name.trim_start_matches('\u{feff}');
        let column = unique_name(name, &seen);
        if column != name {
            tracing::warn!("Duplicate column '{}' in {:?} renamed to '{}'", name, path, column);
        }
        seen.insert(column.clone());
        columns.push(column);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::infer).collect());
    }

    Ok(Table::new(columns, rows))
}
