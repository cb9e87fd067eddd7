use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::table::{Table, Value};
use super::PipelineError;

/// What to do with a row whose date cell cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedDatePolicy {
    /// Drop the row and log a warning
    #[default]
    Skip,
    /// Reject the whole table
    Fail,
}

impl std::str::FromStr for MalformedDatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown malformed date policy '{}'", other)),
        }
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%Y%m%d", "%b %d, %Y", "%B %d, %Y",
    "%d %b %Y", "%d %B %Y", "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date from the formats found in the dividend and earnings feeds
///
/// Timestamps are truncated to their calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn value_as_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Text(s) => parse_date(s),
        // Compact dates such as 20240105 are inferred as integers by the loader
        Value::Integer(i) => parse_date(&i.to_string()),
        Value::Empty | Value::Float(_) => None,
    }
}

/// Keep rows dated on or after `today`, sorted ascending by that date
///
/// Date cells are normalized to `Value::Date`, which serializes as
/// `YYYY-MM-DD`. An empty table is returned unchanged.
pub fn filter_future_and_sort(
    table: &Table,
    date_column: &str,
    today: NaiveDate,
    policy: MalformedDatePolicy,
) -> Result<Table, PipelineError> {
    if table.is_empty() {
        return Ok(table.clone());
    }

    let idx = table
        .column_index(date_column)
        .ok_or_else(|| PipelineError::MissingColumn(date_column.to_string()))?;

    let mut dated = Vec::with_capacity(table.len());
    for (row_number, row) in table.rows().iter().enumerate() {
        let Some(date) = value_as_date(&row[idx]) else {
            let err = PipelineError::MalformedDate {
                column: date_column.to_string(),
                row: row_number,
                value: format!("{:?}", row[idx]),
            };
            match policy {
                MalformedDatePolicy::Skip => {
                    tracing::warn!("Skipping row: {}", err);
                    continue;
                }
                MalformedDatePolicy::Fail => return Err(err),
            }
        };

        if date >= today {
            dated.push((date, row));
        }
    }

    dated.sort_by_key(|(date, _)| *date);

    let rows = dated
        .into_iter()
        .map(|(date, row)| {
            let mut row = row.clone();
            row[idx] = Value::Date(date);
            row
        })
        .collect();

    Ok(Table::new(table.columns().to_vec(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn calendar(dates: &[&str]) -> Table {
        Table::new(
            vec!["Ticker".into(), "Ex Date".into()],
            dates
                .iter()
                .enumerate()
                .map(|(i, d)| vec![Value::Text(format!("T{}", i)), Value::infer(d)])
                .collect(),
        )
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        for raw in [
            "2024-01-05",
            "2024/01/05",
            "01/05/2024",
            "20240105",
            "Jan 5, 2024",
            "5 Jan 2024",
            "2024-01-05 10:30:00",
            "2024-01-05T10:30:00",
            "2024-01-05T10:30:00+02:00",
        ] {
            assert_eq!(parse_date(raw), Some(expected), "failed to parse {}", raw);
        }

        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_filters_past_rows_and_sorts() {
        let table = calendar(&["2024-07-01", "2020-01-01", "2024-06-15", "2024/06/20"]);

        let result =
            filter_future_and_sort(&table, "Ex Date", today(), MalformedDatePolicy::Skip).unwrap();

        let dates: Vec<_> = (0..result.len())
            .map(|i| result.get(i, "Ex Date").unwrap().clone())
            .collect();
        let ymd = |m, d| Value::Date(NaiveDate::from_ymd_opt(2024, m, d).unwrap());
        assert_eq!(dates, vec![ymd(6, 15), ymd(6, 20), ymd(7, 1)]);
        assert_eq!(result.records()[0]["Ex Date"], "2024-06-15");
        assert_eq!(result.get(0, "Ticker"), Some(&Value::Text("T2".into())));
    }

    #[test]
    fn test_results_are_never_before_today() {
        let table = calendar(&[
            "2023-12-31",
            "2024-06-14",
            "2025-01-01",
            "2024-06-16",
            "2024-06-15 23:59:00",
        ]);

        let result =
            filter_future_and_sort(&table, "Ex Date", today(), MalformedDatePolicy::Skip).unwrap();

        let dates: Vec<NaiveDate> = (0..result.len())
            .map(|i| value_as_date(result.get(i, "Ex Date").unwrap()).unwrap())
            .collect();
        assert_eq!(dates.len(), 3);
        assert!(dates.iter().all(|d| *d >= today()));
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_table_is_unchanged() {
        let table = Table::empty();
        let result =
            filter_future_and_sort(&table, "Ex Date", today(), MalformedDatePolicy::Fail).unwrap();
        assert_eq!(result, table);
    }

    #[test]
    fn test_malformed_date_policies() {
        let table = calendar(&["2024-07-01", "soon"]);

        let skipped =
            filter_future_and_sort(&table, "Ex Date", today(), MalformedDatePolicy::Skip).unwrap();
        assert_eq!(skipped.len(), 1);

        let failed = filter_future_and_sort(&table, "Ex Date", today(), MalformedDatePolicy::Fail);
        assert!(matches!(
            failed,
            Err(PipelineError::MalformedDate { row: 1, .. })
        ));
    }

    #[test]
    fn test_missing_date_column() {
        let table = calendar(&["2024-07-01"]);
        let result = filter_future_and_sort(&table, "Pay Date", today(), MalformedDatePolicy::Skip);
        assert!(matches!(result, Err(PipelineError::MissingColumn(c)) if c == "Pay Date"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("skip".parse::<MalformedDatePolicy>(), Ok(MalformedDatePolicy::Skip));
        assert_eq!(" FAIL ".parse::<MalformedDatePolicy>(), Ok(MalformedDatePolicy::Fail));
        assert!("ignore".parse::<MalformedDatePolicy>().is_err());
    }
}
