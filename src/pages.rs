//! Page composition: which tables appear on which dashboard route.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::constants::*;
use crate::pipeline::{
    self, CellStyle, GridOptions, Highlight, MalformedDatePolicy, Table, TableDescriptor,
    TableSpec,
};

/// Dashboard route under `/main/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Cefs,
    Preferreds,
    Markets,
    NotFound,
}

impl PageKind {
    /// Resolve the path below `/main/`; anything unrecognised is `NotFound`
    pub fn parse(path: &str) -> Self {
        match path.trim_matches('/') {
            "cefs" => PageKind::Cefs,
            "preferreds" => PageKind::Preferreds,
            "markets" => PageKind::Markets,
            _ => PageKind::NotFound,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Cefs => "Closed-End Funds",
            PageKind::Preferreds => "Preferred Stocks",
            PageKind::Markets => "Market Overview",
            PageKind::NotFound => "Not Found",
        }
    }

    pub fn href(self) -> Option<&'static str> {
        match self {
            PageKind::Cefs => Some("/main/cefs"),
            PageKind::Preferreds => Some("/main/preferreds"),
            PageKind::Markets => Some("/main/markets"),
            PageKind::NotFound => None,
        }
    }

    /// Routes shown in the navigation bar, in order
    pub const NAVIGABLE: [PageKind; 3] = [PageKind::Cefs, PageKind::Preferreds, PageKind::Markets];
}

/// Horizontal share of a panel inside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelWidth {
    /// Equal share of the remaining space
    Flex,
    /// Fixed percentage of the row
    Percent(u8),
}

impl PanelWidth {
    pub fn css(self) -> String {
        match self {
            PanelWidth::Flex => "flex: 1;".to_string(),
            PanelWidth::Percent(p) => format!("flex: 1; flex-basis: {p}%; max-width: {p}%;"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub table: TableDescriptor,
    pub width: PanelWidth,
}

/// One vertical section of a page
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A full-width table
    Table(TableDescriptor),
    /// Tables side by side
    Row(Vec<Panel>),
    /// A plain message in place of data
    Notice(&'static str),
}

/// Composed layout of one dashboard route
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub kind: PageKind,
    pub blocks: Vec<Block>,
}

/// Directory holding the CSV snapshots
#[derive(Debug, Clone)]
pub struct DataSources {
    dir: PathBuf,
}

impl DataSources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self, file: &str) -> Table {
        pipeline::load(self.dir.join(file))
    }
}

fn dividend_spec(id: &str, title: &'static str, source: &'static str) -> TableSpec {
    TableSpec {
        rename: DIVIDEND_COLUMNS,
        numeric: &["Amount"],
        date_column: Some("Ex Date"),
        highlight: Some(Highlight {
            column: "Amount",
            style: CellStyle {
                color: AMOUNT_COLOR,
            },
        }),
        ..TableSpec::new(id, title, source, GridOptions::calendar())
    }
}

fn earnings_spec() -> TableSpec {
    TableSpec {
        rename: EARNINGS_COLUMNS,
        date_column: Some("Report Date"),
        ..TableSpec::new(
            "grid-earnings-calendar",
            "Earnings Calendar",
            EARNINGS_CSV,
            GridOptions::calendar(),
        )
    }
}

fn preferreds_spec() -> TableSpec {
    TableSpec {
        numeric: PREFERRED_NUMERIC_COLUMNS,
        excluded: PREFERRED_HIDDEN_COLUMNS,
        ..TableSpec::new(
            "table-preferreds",
            "Preferred Stocks",
            PREFERREDS_CSV,
            GridOptions::master(),
        )
    }
}

fn cefs_spec() -> TableSpec {
    TableSpec {
        numeric: CEF_NUMERIC_COLUMNS,
        ..TableSpec::new(
            "table-cefs",
            "Closed-End Funds",
            CEFS_CSV,
            GridOptions {
                height: "55vh",
                ..GridOptions::master()
            },
        )
    }
}

/// Table specs shown on a page, in display order
pub fn page_specs(kind: PageKind) -> Vec<TableSpec> {
    match kind {
        PageKind::Preferreds => vec![
            preferreds_spec(),
            dividend_spec(
                "grid-dividends-this-week",
                "Dividends This Week",
                DIVIDENDS_THIS_WEEK_CSV,
            ),
            dividend_spec(
                "grid-dividends-next-week",
                "Dividends Next Week",
                DIVIDENDS_NEXT_WEEK_CSV,
            ),
            dividend_spec(
                "grid-dividends-next-month",
                "Dividends Next Month",
                DIVIDENDS_NEXT_MONTH_CSV,
            ),
            earnings_spec(),
        ],
        PageKind::Cefs => vec![
            cefs_spec(),
            dividend_spec(
                "grid-cef-distributions",
                "Upcoming Distributions",
                CEF_DISTRIBUTIONS_CSV,
            ),
        ],
        PageKind::Markets | PageKind::NotFound => Vec::new(),
    }
}

/// Build the layout of a dashboard route
///
/// Never fails: unreadable sources and bad dates degrade individual tables to
/// their placeholder.
pub fn assemble_page(
    kind: PageKind,
    sources: &DataSources,
    today: NaiveDate,
    policy: MalformedDatePolicy,
) -> PageContent {
    let mut tables = page_specs(kind)
        .into_iter()
        .map(|spec| pipeline::build(&sources.load(spec.source), &spec, today, policy));

    let blocks: Vec<Block> = match kind {
        PageKind::Preferreds => {
            let master = tables.next().map(Block::Table);
            let mut panels: Vec<Panel> = tables
                .map(|table| Panel {
                    table,
                    width: PanelWidth::Flex,
                })
                .collect();
            // earnings calendar is narrower than the dividend windows
            if let Some(earnings) = panels.last_mut() {
                earnings.width = PanelWidth::Percent(15);
            }
            master.into_iter().chain([Block::Row(panels)]).collect()
        }
        PageKind::Cefs => tables.map(Block::Table).collect(),
        PageKind::Markets => vec![Block::Notice(MSG_WORK_IN_PROGRESS)],
        PageKind::NotFound => vec![Block::Notice(MSG_PAGE_NOT_FOUND)],
    };

    tracing::debug!("Assembled {:?} page with {} blocks", kind, blocks.len());

    PageContent { kind, blocks }
}
