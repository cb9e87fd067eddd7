//! CSV snapshot to grid descriptor pipeline.

pub mod columns;
pub mod dates;
pub mod descriptor;
pub mod grid;
pub mod loader;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use columns::{classify_numeric, exclude, rename, CellStyle, ColumnDef};
pub use dates::{filter_future_and_sort, parse_date, MalformedDatePolicy};
pub use descriptor::{build, GridDescriptor, GridId, Highlight, TableDescriptor, TableSpec};
pub use grid::GridOptions;
pub use loader::{load, try_load};
pub use table::{Table, Value};

/// Failure while loading or transforming a single table
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Source not found: {0:?}")]
    SourceMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Unparseable date {value} in column '{column}' at row {row}")]
    MalformedDate {
        column: String,
        row: usize,
        value: String,
    },
}
