use chrono::NaiveDate;
use serde_json::{Map, Value as Json};

use super::columns::{classify_numeric, exclude, rename, CellStyle, ColumnDef};
use super::dates::{filter_future_and_sort, MalformedDatePolicy};
use super::grid::GridOptions;
use super::table::Table;

/// Unique element identifier of a rendered grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridId(String);

impl GridId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style applied to one column after renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub column: &'static str,
    pub style: CellStyle,
}

/// Static description of how one source table is displayed
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub id: GridId,
    pub title: &'static str,
    /// File name relative to the data directory
    pub source: &'static str,
    /// Source name to display name
    pub rename: &'static [(&'static str, &'static str)],
    /// Display names of numeric columns
    pub numeric: &'static [&'static str],
    /// Source names of columns never shown
    pub excluded: &'static [&'static str],
    /// Display name of the column to window on, if any
    pub date_column: Option<&'static str>,
    pub highlight: Option<Highlight>,
    pub options: GridOptions,
}

impl TableSpec {
    /// A plain grid: no renaming, typing, filtering or styling
    pub fn new(id: &str, title: &'static str, source: &'static str, options: GridOptions) -> Self {
        Self {
            id: GridId::new(id),
            title,
            source,
            rename: &[],
            numeric: &[],
            excluded: &[],
            date_column: None,
            highlight: None,
            options,
        }
    }
}

/// A populated grid ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptor {
    pub id: GridId,
    pub title: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Map<String, Json>>,
    pub options: GridOptions,
}

impl GridDescriptor {
    /// Client-side grid options, including columns and row data
    pub fn grid_options(&self) -> Json {
        self.options.to_json(&self.columns, &self.rows)
    }
}

/// Renderable output for one on-screen table
#[derive(Debug, Clone, PartialEq)]
pub enum TableDescriptor {
    /// Nothing to show; rendered as the title plus a placeholder
    Empty { title: String },
    Grid(GridDescriptor),
}

impl TableDescriptor {
    pub fn title(&self) -> &str {
        match self {
            TableDescriptor::Empty { title } => title,
            TableDescriptor::Grid(grid) => &grid.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableDescriptor::Empty { .. })
    }
}

/// Turn a loaded table into a descriptor according to `spec`
///
/// Hidden columns are dropped first, then columns are renamed, then rows are
/// windowed on `spec.date_column` when the table has that column. A table
/// that ends up with no rows, or whose dates cannot be processed, yields the
/// empty descriptor.
pub fn build(
    table: &Table,
    spec: &TableSpec,
    today: NaiveDate,
    policy: MalformedDatePolicy,
) -> TableDescriptor {
    let empty = || TableDescriptor::Empty {
        title: spec.title.to_string(),
    };

    if table.is_empty() {
        return empty();
    }

    let table = rename(&exclude(table, spec.excluded), spec.rename);

    let table = match spec.date_column {
        Some(column) if table.column_index(column).is_some() => {
            match filter_future_and_sort(&table, column, today, policy) {
                Ok(filtered) => filtered,
                Err(e) => {
                    tracing::error!("Dropping table '{}': {}", spec.title, e);
                    return empty();
                }
            }
        }
        _ => table,
    };

    if table.is_empty() {
        return empty();
    }

    let mut columns = classify_numeric(table.columns(), spec.numeric);
    if let Some(highlight) = &spec.highlight {
        for col in columns.iter_mut().filter(|c| c.field == highlight.column) {
            col.style = Some(highlight.style.clone());
        }
    }

    TableDescriptor::Grid(GridDescriptor {
        id: spec.id.clone(),
        title: spec.title.to_string(),
        columns,
        rows: table.records(),
        options: spec.options.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::table::Value;
    use std::collections::BTreeSet;

    const RENAME: &[(&str, &str)] = &[
        ("ticker", "Ticker"),
        ("ex_dividend_date", "Ex Date"),
        ("cash_amount", "Amount"),
    ];

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn spec() -> TableSpec {
        TableSpec {
            rename: RENAME,
            numeric: &["Amount"],
            excluded: &["internal"],
            date_column: Some("Ex Date"),
            highlight: Some(Highlight {
                column: "Amount",
                style: CellStyle { color: "#CCF381" },
            }),
            ..TableSpec::new(
                "grid-dividends-test",
                "Dividends Test",
                "test.csv",
                GridOptions::calendar(),
            )
        }
    }

    fn dividends(dates: &[&str]) -> Table {
        Table::new(
            vec![
                "ticker".into(),
                "ex_dividend_date".into(),
                "cash_amount".into(),
                "internal".into(),
            ],
            dates
                .iter()
                .map(|d| {
                    vec![
                        Value::Text("ABC".into()),
                        Value::Text(d.to_string()),
                        Value::Float(0.5),
                        Value::Text("x".into()),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_table_builds_empty_descriptor() {
        let descriptor = build(&Table::empty(), &spec(), today(), MalformedDatePolicy::Skip);
        assert_eq!(
            descriptor,
            TableDescriptor::Empty {
                title: "Dividends Test".into()
            }
        );
    }

    #[test]
    fn test_all_past_rows_build_empty_descriptor() {
        let descriptor = build(
            &dividends(&["2020-01-01"]),
            &spec(),
            today(),
            MalformedDatePolicy::Skip,
        );
        assert!(descriptor.is_empty());
        assert_eq!(descriptor.title(), "Dividends Test");
    }

    #[test]
    fn test_columns_match_row_keys() {
        let descriptor = build(
            &dividends(&["2024-07-01", "2024-06-20", "2019-01-01"]),
            &spec(),
            today(),
            MalformedDatePolicy::Skip,
        );

        let TableDescriptor::Grid(grid) = descriptor else {
            panic!("expected a grid");
        };

        let fields: BTreeSet<&str> = grid.columns.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, BTreeSet::from(["Ticker", "Ex Date", "Amount"]));
        for row in &grid.rows {
            let keys: BTreeSet<&str> = row.keys().map(String::as_str).collect();
            assert_eq!(keys, fields);
        }

        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[0]["Ex Date"], "2024-06-20");
        assert_eq!(grid.id.as_str(), "grid-dividends-test");
    }

    #[test]
    fn test_colliding_rename_keeps_columns_and_row_keys_aligned() {
        let spec = TableSpec {
            rename: crate::constants::EARNINGS_COLUMNS,
            ..TableSpec::new("grid-earnings", "Earnings", "e.csv", GridOptions::calendar())
        };
        let table = Table::new(
            vec!["symbol".into(), "Ticker".into()],
            vec![vec![Value::Text("A".into()), Value::Text("B".into())]],
        );

        let TableDescriptor::Grid(grid) = build(&table, &spec, today(), MalformedDatePolicy::Skip)
        else {
            panic!("expected a grid");
        };

        let fields: Vec<&str> = grid.columns.iter().map(|c| c.field.as_str()).collect();
        let keys: Vec<&str> = grid.rows[0].keys().map(String::as_str).collect();
        assert_eq!(fields, ["symbol", "Ticker"]);
        assert_eq!(keys, fields);
        assert_eq!(grid.rows[0]["symbol"], "A");
        assert_eq!(grid.rows[0]["Ticker"], "B");
    }

    #[test]
    fn test_numeric_and_highlight_applied_after_rename() {
        let descriptor = build(
            &dividends(&["2024-07-01"]),
            &spec(),
            today(),
            MalformedDatePolicy::Skip,
        );
        let TableDescriptor::Grid(grid) = descriptor else {
            panic!("expected a grid");
        };

        let amount = grid.columns.iter().find(|c| c.field == "Amount").unwrap();
        assert!(amount.numeric);
        assert_eq!(amount.style, Some(CellStyle { color: "#CCF381" }));

        let ticker = grid.columns.iter().find(|c| c.field == "Ticker").unwrap();
        assert!(!ticker.numeric);
        assert!(ticker.style.is_none());
    }

    #[test]
    fn test_malformed_dates_under_fail_policy_degrade_to_empty() {
        let descriptor = build(
            &dividends(&["2024-07-01", "someday"]),
            &spec(),
            today(),
            MalformedDatePolicy::Fail,
        );
        assert!(descriptor.is_empty());
    }

    #[test]
    fn test_table_without_date_column_is_not_windowed() {
        let spec = TableSpec::new("grid-plain", "Plain", "plain.csv", GridOptions::master());
        let table = Table::new(
            vec!["TICKER".into()],
            vec![vec![Value::Text("A".into())], vec![Value::Text("B".into())]],
        );

        let descriptor = build(&table, &spec, today(), MalformedDatePolicy::Fail);
        let TableDescriptor::Grid(grid) = descriptor else {
            panic!("expected a grid");
        };
        assert_eq!(grid.rows.len(), 2);
    }
}
