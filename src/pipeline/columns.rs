use std::collections::HashSet;

use serde::Serialize;

use super::table::{unique_name, Table};

/// Typed cell style hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    pub color: &'static str,
}

/// Display definition of a single grid column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub header_name: String,
    pub field: String,
    pub numeric: bool,
    pub style: Option<CellStyle>,
}

impl ColumnDef {
    pub fn new(name: &str, numeric: bool) -> Self {
        Self {
            header_name: name.to_string(),
            field: name.to_string(),
            numeric,
            style: None,
        }
    }
}

/// Rename columns found in `mapping`; others pass through unchanged
///
/// A target that would duplicate an existing column name is skipped and the
/// column keeps its source name.
pub fn rename(table: &Table, mapping: &[(&str, &str)]) -> Table {
    let target = |col: &str| {
        mapping
            .iter()
            .find(|(from, _)| *from == col)
            .map(|(_, to)| *to)
    };

    // Unmapped names are reserved before any target is assigned
    let mut taken: HashSet<String> = table
        .columns()
        .iter()
        .filter(|col| target(col).is_none())
        .cloned()
        .collect();

    let columns = table
        .columns()
        .iter()
        .map(|col| {
            let name = match target(col) {
                None => col.clone(),
                Some(to) if !taken.contains(to) => to.to_string(),
                Some(to) => {
                    let kept = unique_name(col, &taken);
                    tracing::warn!(
                        "Not renaming '{}' to existing column '{}', kept as '{}'",
                        col,
                        to,
                        kept
                    );
                    kept
                }
            };
            taken.insert(name.clone());
            name
        })
        .collect();

    Table::new(columns, table.rows().to_vec())
}

/// Drop the listed columns along with their values
pub fn exclude(table: &Table, excluded: &[&str]) -> Table {
    let keep: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, col)| !excluded.contains(&col.as_str()))
        .map(|(i, _)| i)
        .collect();

    if keep.len() == table.columns().len() {
        return table.clone();
    }

    let columns = keep.iter().map(|&i| table.columns()[i].clone()).collect();
    let rows = table
        .rows()
        .iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();

    Table::new(columns, rows)
}

/// Tag each column as numeric when it is a member of `numeric`
pub fn classify_numeric(columns: &[String], numeric: &[&str]) -> Vec<ColumnDef> {
    columns
        .iter()
        .map(|col| ColumnDef::new(col, numeric.contains(&col.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::table::Value;

    fn dividends() -> Table {
        Table::new(
            vec![
                "ticker".into(),
                "ex_dividend_date".into(),
                "pay_date".into(),
                "cash_amount".into(),
            ],
            vec![
                vec![
                    Value::Text("ABC".into()),
                    Value::Text("2020-01-01".into()),
                    Value::Text("2020-01-15".into()),
                    Value::Float(0.5),
                ],
                vec![
                    Value::Text("XYZ".into()),
                    Value::Text("2030-01-01".into()),
                    Value::Empty,
                    Value::Integer(1),
                ],
            ],
        )
    }

    #[test]
    fn test_rename_maps_only_listed_columns() {
        let table = dividends();
        let renamed = rename(&table, &[("ticker", "Ticker"), ("cash_amount", "Amount")]);

        assert_eq!(
            renamed.columns(),
            ["Ticker", "ex_dividend_date", "pay_date", "Amount"]
        );
        assert_eq!(renamed.len(), table.len());
        assert_eq!(renamed.rows(), table.rows());
        // input untouched
        assert_eq!(table.columns()[0], "ticker");
    }

    #[test]
    fn test_rename_ignores_unknown_mapping_keys() {
        let table = dividends();
        let renamed = rename(&table, &[("symbol", "Ticker")]);
        assert_eq!(renamed, table);
    }

    #[test]
    fn test_rename_never_duplicates_a_column() {
        let table = Table::new(
            vec!["symbol".into(), "Ticker".into(), "reportDate".into()],
            vec![vec![
                Value::Text("A".into()),
                Value::Text("B".into()),
                Value::Text("2030-01-01".into()),
            ]],
        );

        let renamed = rename(&table, &[("symbol", "Ticker"), ("reportDate", "Report Date")]);

        assert_eq!(renamed.columns(), ["symbol", "Ticker", "Report Date"]);
        assert_eq!(renamed.get(0, "symbol"), Some(&Value::Text("A".into())));
        assert_eq!(renamed.get(0, "Ticker"), Some(&Value::Text("B".into())));
    }

    #[test]
    fn test_rename_two_sources_onto_one_target() {
        let table = dividends();
        let renamed = rename(&table, &[("ticker", "Date"), ("pay_date", "Date")]);

        assert_eq!(
            renamed.columns(),
            ["Date", "ex_dividend_date", "pay_date", "cash_amount"]
        );
    }

    #[test]
    fn test_exclude_drops_columns_and_values() {
        let table = dividends();
        let trimmed = exclude(&table, &["pay_date", "not_there"]);

        assert_eq!(trimmed.columns(), ["ticker", "ex_dividend_date", "cash_amount"]);
        assert_eq!(trimmed.get(1, "cash_amount"), Some(&Value::Integer(1)));
        assert_eq!(trimmed.rows()[0].len(), 3);
    }

    #[test]
    fn test_classify_numeric_preserves_order() {
        let columns: Vec<String> = ["TICKER", "YTW", "PRICE", "DAYS TO CALL"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let defs = classify_numeric(&columns, &["DAYS TO CALL", "YTW"]);

        let flags: Vec<(&str, bool)> = defs
            .iter()
            .map(|d| (d.field.as_str(), d.numeric))
            .collect();
        assert_eq!(
            flags,
            [
                ("TICKER", false),
                ("YTW", true),
                ("PRICE", false),
                ("DAYS TO CALL", true)
            ]
        );
    }
}
