use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Number, Value as Json};

/// A single scalar cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Integer(i64),
    /// Always finite; the loader never produces NaN or infinities
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// Infer a cell value from raw CSV text
    ///
    /// Blank cells become `Empty`, integral text becomes `Integer`, other
    /// finite numbers become `Float`, everything else stays `Text`.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Empty;
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }

        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() && looks_numeric(trimmed) => Value::Float(f),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    /// Convert to a JSON value for grid row records
    pub fn to_json(&self) -> Json {
        match self {
            Value::Empty => Json::Null,
            Value::Integer(i) => Json::from(*i),
            Value::Float(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
            Value::Text(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

// Rust accepts "inf", "nan" and "infinity"; those are text in a CSV snapshot
fn looks_numeric(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// `base` itself, or the first of `base.1`, `base.2`, ... not yet in `taken`
pub(crate) fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    (1..)
        .map(|n| format!("{}.{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Ordered rows of uniform-keyed scalar values
///
/// Every row holds exactly one value per column, in column order. Column
/// names are expected to be unique; the loader and `rename` keep them so.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// The table with zero rows and zero columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, padding short rows with `Empty` and truncating long ones
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at `row` for the named column
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Rows as ordered JSON maps keyed by column name
    pub fn records(&self) -> Vec<Map<String, Json>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(Value::to_json))
                    .collect()
            })
            .collect()
    }
}
