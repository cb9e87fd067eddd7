/// Session lifetime in days, renewed on every authenticated request
pub const SESSION_TTL_DAYS: i64 = 14;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Where a successful login lands
pub const DEFAULT_ROUTE: &str = "/main/cefs";

// =============================================================================
// CSV Sources
// =============================================================================

pub const DIVIDENDS_THIS_WEEK_CSV: &str = "dividends_grouped_This Week.csv";
pub const DIVIDENDS_NEXT_WEEK_CSV: &str = "dividends_grouped_Next Week.csv";
pub const DIVIDENDS_NEXT_MONTH_CSV: &str = "dividends_grouped_Next Month.csv";
pub const EARNINGS_CSV: &str = "earnings.csv";
pub const PREFERREDS_CSV: &str = "output.csv";
pub const CEFS_CSV: &str = "cefs.csv";
pub const CEF_DISTRIBUTIONS_CSV: &str = "cef_distributions.csv";

// =============================================================================
// Column Mappings
// =============================================================================

pub const DIVIDEND_COLUMNS: &[(&str, &str)] = &[
    ("ticker", "Ticker"),
    ("ex_dividend_date", "Ex Date"),
    ("pay_date", "Pay Date"),
    ("cash_amount", "Amount"),
];

pub const EARNINGS_COLUMNS: &[(&str, &str)] = &[("symbol", "Ticker"), ("reportDate", "Report Date")];

pub const PREFERRED_NUMERIC_COLUMNS: &[&str] = &[
    "YTW",
    "DAYS TO CALL",
    "DAYS TO MATUR",
    "SHARES OUTS",
    "NOM YIELD",
    "DAYS TO FLOAT/RESET",
];

pub const PREFERRED_HIDDEN_COLUMNS: &[&str] = &["ASSET TYPE", "CAPITAL GAINS", "INV GRADE", "ADV30"];

pub const CEF_NUMERIC_COLUMNS: &[&str] = &[
    "PRICE",
    "NAV",
    "PREM/DISC",
    "52W AVG PREM/DISC",
    "Z-SCORE",
    "DIST RATE",
    "DIST RATE ON NAV",
    "LEVERAGE",
    "EXPENSE RATIO",
    "AVG VOLUME",
];

/// Text color of the dividend amount column
pub const AMOUNT_COLOR: &str = "#CCF381";

// =============================================================================
// Messages
// =============================================================================

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_NO_DATA: &str = "No data available.";
pub const MSG_WORK_IN_PROGRESS: &str = "Work In Progress";
pub const MSG_PAGE_NOT_FOUND: &str = "Page not found";
