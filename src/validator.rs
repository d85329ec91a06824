//! Per-file validation rules.
//!
//! Checks run in a fixed order and the first failure wins:
//! readable → non-empty → required columns present → no negative sales.

use std::fmt;
use std::path::Path;

use crate::table::{self, ReadError, Table};

/// Columns every intake file must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Order ID", "Sales", "Profit"];

/// Column checked by the non-negative rule.
pub const SALES_COLUMN: &str = "Sales";

/// Reason given for accepted files.
pub const PASSED: &str = "Passed all checks";

/// Why a file was rejected
#[derive(Debug)]
pub enum Rejection {
    /// The file could not be decoded or parsed
    Unreadable(ReadError),
    /// Header present but no data rows
    Empty,
    /// Required columns absent, in [`REQUIRED_COLUMNS`] order
    MissingColumns(Vec<String>),
    /// At least one sales value is below zero
    NegativeSales,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unreadable(err) => write!(f, "Critical Read Error: {}", err),
            Rejection::Empty => write!(f, "File is empty"),
            Rejection::MissingColumns(cols) => {
                write!(f, "Missing critical columns: {}", cols.join(", "))
            }
            Rejection::NegativeSales => write!(f, "Contains negative Sales values"),
        }
    }
}

/// Outcome of validating one file. Produced once, never revised.
#[derive(Debug)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Human-readable reason, as written to the audit log
    pub fn reason(&self) -> String {
        match self {
            Verdict::Accepted => PASSED.to_string(),
            Verdict::Rejected(rejection) => rejection.to_string(),
        }
    }
}

/// Validate the file at `path`. Read failures become rejections.
pub fn validate(path: &Path) -> Verdict {
    match table::read_table(path) {
        Ok(table) => validate_table(&table),
        Err(err) => Verdict::Rejected(Rejection::Unreadable(err)),
    }
}

/// Apply the rules to an already parsed table.
pub fn validate_table(table: &Table) -> Verdict {
    if table.is_empty() {
        return Verdict::Rejected(Rejection::Empty);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Verdict::Rejected(Rejection::MissingColumns(missing));
    }

    let has_negative = table
        .column(SALES_COLUMN)
        .map(|mut values| values.any(|v| coerce_number(v).is_some_and(|n| n < 0.0)))
        .unwrap_or(false);
    if has_negative {
        return Verdict::Rejected(Rejection::NegativeSales);
    }

    Verdict::Accepted
}

/// Numeric coercion for rule checks. Values that do not parse are `None`
/// and take no part in the negativity rule.
pub fn coerce_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn table(csv: &str) -> Table {
        table::parse_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_valid_file_passes() {
        let verdict = validate_table(&table("Order ID,Sales,Profit\nA-1,100,12\nA-2,0,-4\n"));
        assert!(verdict.is_accepted());
        assert_eq!(verdict.reason(), "Passed all checks");
    }

    #[test]
    fn test_empty_file_rejected() {
        let verdict = validate_table(&table("Order ID,Sales,Profit\n"));
        assert!(!verdict.is_accepted());
        assert_eq!(verdict.reason(), "File is empty");
    }

    #[test]
    fn test_empty_checked_before_columns() {
        let verdict = validate_table(&table("Something\n"));
        assert!(matches!(verdict, Verdict::Rejected(Rejection::Empty)));
    }

    #[test]
    fn test_missing_single_column() {
        let verdict = validate_table(&table("Order ID,Sales\nA-1,100\n"));
        match verdict {
            Verdict::Rejected(Rejection::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["Profit"]);
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
    }

    #[test]
    fn test_missing_columns_listed_in_order() {
        let verdict = validate_table(&table("Region\nWest\n"));
        assert_eq!(
            verdict.reason(),
            "Missing critical columns: Order ID, Sales, Profit"
        );
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let verdict = validate_table(&table("order id,Sales,Profit\n1,2,3\n"));
        assert_eq!(verdict.reason(), "Missing critical columns: Order ID");
    }

    #[test]
    fn test_missing_column_reported_before_negative_sales() {
        let verdict = validate_table(&table("Order ID,Sales\nA-1,-5\n"));
        assert!(matches!(
            verdict,
            Verdict::Rejected(Rejection::MissingColumns(_))
        ));
    }

    #[test]
    fn test_negative_sales_rejected() {
        let verdict = validate_table(&table("Order ID,Sales,Profit\nA-1,100,1\nA-2,-5,1\n"));
        assert!(matches!(verdict, Verdict::Rejected(Rejection::NegativeSales)));
        assert_eq!(verdict.reason(), "Contains negative Sales values");
    }

    #[test]
    fn test_non_numeric_sales_ignored() {
        let verdict = validate_table(&table(
            "Order ID,Sales,Profit\nA-1,n/a,1\nA-2,,1\nA-3,\"1,000\",1\n",
        ));
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_non_numeric_does_not_hide_negative() {
        let verdict = validate_table(&table("Order ID,Sales,Profit\nA-1,abc,1\nA-2,-0.01,1\n"));
        assert!(matches!(verdict, Verdict::Rejected(Rejection::NegativeSales)));
    }

    #[test]
    fn test_negative_profit_is_allowed() {
        let verdict = validate_table(&table("Order ID,Sales,Profit\nA-1,10,-999\n"));
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("100"), Some(100.0));
        assert_eq!(coerce_number(" -5 "), Some(-5.0));
        assert_eq!(coerce_number("1e3"), Some(1000.0));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("ten"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("-0"), Some(-0.0));
    }

    #[test]
    fn test_negative_zero_is_not_negative() {
        let verdict = validate_table(&table("Order ID,Sales,Profit\nA-1,-0,1\n"));
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_validate_unreadable_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("zero.csv");
        fs::write(&path, b"").unwrap();

        let verdict = validate(&path);
        assert_eq!(
            verdict.reason(),
            "Critical Read Error: No columns to parse from file"
        );
    }

    #[test]
    fn test_validate_malformed_row() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ragged.csv");
        fs::write(&path, "Order ID,Sales,Profit\nA-1,1,2,3\n").unwrap();

        let verdict = validate(&path);
        assert!(verdict.reason().starts_with("Critical Read Error: "));
        assert!(verdict.reason().contains("Expected 3 fields in line 2, saw 4"));
    }

    #[test]
    fn test_validate_windows_1252_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("latin.csv");
        fs::write(&path, b"Order ID,Sales,Profit,Customer\nA-1,5,1,Ren\xE9\n").unwrap();

        assert!(validate(&path).is_accepted());
    }
}
