//! Transaction Cleaner
//! Validates required columns, coerces types, normalizes transaction types and
//! drops unusable rows. The input frame is never modified.

use crate::data::columns::{self, AMOUNT, DATE, TYPE};
use crate::error::{ReportError, Result};
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Raw type labels understood out of the box, already trimmed and uppercased.
pub const DEFAULT_TYPE_MAP: [(&str, &str); 6] = [
    ("CREDIT", "INCOME"),
    ("CR", "INCOME"),
    ("INCOME", "INCOME"),
    ("DEBIT", "EXPENSE"),
    ("DR", "EXPENSE"),
    ("EXPENSE", "EXPENSE"),
];

pub const DEFAULT_REQUIRED_COLUMNS: [&str; 2] = [DATE, AMOUNT];

/// Canonical transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Canonical uppercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    /// Match an already-normalized label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "INCOME" => Some(TransactionType::Income),
            "EXPENSE" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied translation from raw type strings to canonical labels.
/// Keys and values are trimmed and uppercased on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMap {
    entries: HashMap<String, String>,
}

impl TypeMap {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| {
                    let value: String = v.into();
                    (normalize_label(k.as_ref()), normalize_label(&value))
                })
                .collect(),
        }
    }

    /// Mapped label for an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True when no entries were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Replaces `DEFAULT_TYPE_MAP` entirely when set and non-empty.
    pub type_map: Option<TypeMap>,
    pub required_columns: Vec<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            type_map: None,
            required_columns: DEFAULT_REQUIRED_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl CleanOptions {
    /// Trim, uppercase, then map or pass through.
    pub fn normalize_type(&self, raw: &str) -> String {
        let key = normalize_label(raw);
        let mapped = match self.type_map.as_ref().filter(|m| !m.is_empty()) {
            Some(map) => map.get(&key).map(str::to_string),
            None => DEFAULT_TYPE_MAP
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| to.to_string()),
        };
        mapped.unwrap_or(key)
    }
}

/// Clean a raw transactions frame so it is ready for summarising.
///
/// Unparseable dates and amounts become nulls and their rows are dropped; only
/// a missing required column is an error.
pub fn clean_transactions(df: &DataFrame, options: &CleanOptions) -> Result<DataFrame> {
    columns::require_columns(df, &options.required_columns)?;

    let mut cleaned = df.clone();

    if columns::has_column(&cleaned, DATE) {
        let dates = columns::date_values(cleaned.column(DATE)?)?;
        cleaned.with_column(Series::new(DATE.into(), dates))?;
    }

    if columns::has_column(&cleaned, AMOUNT) {
        let amounts = columns::amount_values(cleaned.column(AMOUNT)?)?;
        cleaned.with_column(Series::new(AMOUNT.into(), amounts))?;
    }

    if columns::has_column(&cleaned, TYPE) {
        let types: Vec<Option<String>> = columns::string_values(cleaned.column(TYPE)?)?
            .into_iter()
            .map(|v| v.map(|raw| options.normalize_type(&raw)))
            .collect();
        cleaned.with_column(Series::new(TYPE.into(), types))?;
    }

    let mut keep = vec![true; cleaned.height()];
    for name in &options.required_columns {
        let nulls = cleaned.column(name)?.as_materialized_series().is_null();
        for (flag, is_null) in keep.iter_mut().zip(nulls.into_iter()) {
            if is_null.unwrap_or(false) {
                *flag = false;
            }
        }
    }

    let dropped = keep.iter().filter(|k| !**k).count();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let cleaned = cleaned.filter(&mask)?;

    if dropped > 0 {
        info!("Dropped {} rows with missing required values", dropped);
    }
    debug!("Cleaned dataset has {} rows", cleaned.height());
    Ok(cleaned)
}

/// Keep only rows of one normalized transaction type.
pub fn filter_by_type(df: &DataFrame, kind: TransactionType) -> Result<DataFrame> {
    if !columns::has_column(df, TYPE) {
        return Err(ReportError::MissingColumn(vec![TYPE.to_string()]));
    }

    let filtered = df
        .clone()
        .lazy()
        .filter(col(TYPE).eq(lit(kind.as_str())))
        .collect()?;
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_frame() -> DataFrame {
        df!(
            "date" => ["2024-01-01", "invalid", "2024-01-03"],
            "amount" => ["100", "abc", "200"],
            "type" => ["credit", "debit", "INCOME"],
            "category" => ["Salary", "Groceries", "Bonus"]
        )
        .unwrap()
    }

    fn str_column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        columns::string_values(df.column(name).unwrap()).unwrap()
    }

    #[test]
    fn test_clean_transactions_basic() {
        let raw = raw_frame();
        let cleaned = clean_transactions(&raw, &CleanOptions::default()).unwrap();

        assert_eq!(cleaned.height(), 2);
        assert_eq!(cleaned.column("date").unwrap().dtype(), &DataType::Date);
        assert_eq!(cleaned.column("amount").unwrap().dtype(), &DataType::Float64);

        let types = str_column(&cleaned, "type");
        assert!(types
            .iter()
            .all(|t| matches!(t.as_deref(), Some("INCOME") | Some("EXPENSE"))));

        let dates = columns::date_values(cleaned.column("date").unwrap()).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 1, 3)
            ]
        );
        assert_eq!(
            str_column(&cleaned, "category"),
            vec![Some("Salary".to_string()), Some("Bonus".to_string())]
        );
    }

    #[test]
    fn test_clean_transactions_does_not_mutate_input() {
        let raw = raw_frame();
        let before = raw.clone();
        clean_transactions(&raw, &CleanOptions::default()).unwrap();
        assert!(raw.equals_missing(&before));
    }

    #[test]
    fn test_clean_transactions_missing_required_column() {
        let raw = df!("amount" => [100, 200]).unwrap();
        let err = clean_transactions(&raw, &CleanOptions::default()).unwrap_err();
        match err {
            ReportError::MissingColumn(cols) => assert_eq!(cols, vec!["date"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clean_transactions_reports_all_missing_columns() {
        let raw = df!("category" => ["Rent"]).unwrap();
        let err = clean_transactions(&raw, &CleanOptions::default()).unwrap_err();
        match err {
            ReportError::MissingColumn(cols) => assert_eq!(cols, vec!["date", "amount"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_types_pass_through_uppercased() {
        let raw = df!(
            "date" => ["2024-01-01", "2024-01-02", "2024-01-03"],
            "amount" => ["1", "2", "3"],
            "type" => ["  dr ", "transfer", "Cr"]
        )
        .unwrap();
        let cleaned = clean_transactions(&raw, &CleanOptions::default()).unwrap();
        assert_eq!(
            str_column(&cleaned, "type"),
            vec![
                Some("EXPENSE".to_string()),
                Some("TRANSFER".to_string()),
                Some("INCOME".to_string())
            ]
        );
    }

    #[test]
    fn test_custom_type_map_replaces_default() {
        let options = CleanOptions {
            type_map: Some(TypeMap::new([("deposit", "INCOME"), ("withdrawal", "EXPENSE")])),
            ..CleanOptions::default()
        };
        assert_eq!(options.normalize_type(" Deposit"), "INCOME");
        assert_eq!(options.normalize_type("WITHDRAWAL"), "EXPENSE");
        // The default entries are not merged in.
        assert_eq!(options.normalize_type("credit"), "CREDIT");
    }

    #[test]
    fn test_type_map_values_are_normalized() {
        let options = CleanOptions {
            type_map: Some(TypeMap::new([("deposit", " income "), ("fee", "Expense")])),
            ..CleanOptions::default()
        };
        assert_eq!(options.normalize_type("DEPOSIT"), "INCOME");
        assert_eq!(options.normalize_type("fee"), "EXPENSE");

        let raw = df!(
            "date" => ["2024-01-01", "2024-01-02"],
            "amount" => ["10", "-2"],
            "type" => ["deposit", "fee"]
        )
        .unwrap();
        let cleaned = clean_transactions(&raw, &options).unwrap();
        let income = filter_by_type(&cleaned, TransactionType::Income).unwrap();
        let expense = filter_by_type(&cleaned, TransactionType::Expense).unwrap();
        assert_eq!((income.height(), expense.height()), (1, 1));
    }

    #[test]
    fn test_empty_type_map_falls_back_to_default() {
        let options = CleanOptions {
            type_map: Some(TypeMap::default()),
            ..CleanOptions::default()
        };
        assert_eq!(options.normalize_type("debit"), "EXPENSE");
    }

    #[test]
    fn test_optional_columns_are_not_null_checked() {
        let raw = df!(
            "date" => [Some("2024-01-01"), Some("2024-01-02")],
            "amount" => [Some("5"), Some("6")],
            "category" => [None::<&str>, Some("Food")]
        )
        .unwrap();
        let cleaned = clean_transactions(&raw, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.height(), 2);
    }

    #[test]
    fn test_extra_required_column_is_null_checked() {
        let raw = df!(
            "date" => [Some("2024-01-01"), Some("2024-01-02")],
            "amount" => [Some("5"), Some("6")],
            "category" => [None::<&str>, Some("Food")]
        )
        .unwrap();
        let options = CleanOptions {
            required_columns: vec!["date".into(), "amount".into(), "category".into()],
            ..CleanOptions::default()
        };
        let cleaned = clean_transactions(&raw, &options).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(str_column(&cleaned, "category"), vec![Some("Food".to_string())]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean_transactions(&raw_frame(), &CleanOptions::default()).unwrap();
        let twice = clean_transactions(&once, &CleanOptions::default()).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_cleaned_required_columns_have_no_nulls() {
        let raw = df!(
            "date" => [Some("2024-02-01"), None, Some("bad"), Some("2024-02-04")],
            "amount" => [Some("1"), Some("2"), Some("3"), None]
        )
        .unwrap();
        let cleaned = clean_transactions(&raw, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.column("date").unwrap().null_count(), 0);
        assert_eq!(cleaned.column("amount").unwrap().null_count(), 0);
    }

    #[test]
    fn test_filter_by_type() {
        let cleaned = clean_transactions(&raw_frame(), &CleanOptions::default()).unwrap();
        let income = filter_by_type(&cleaned, TransactionType::Income).unwrap();
        assert_eq!(income.height(), 2);
        let expense = filter_by_type(&cleaned, TransactionType::Expense).unwrap();
        assert_eq!(expense.height(), 0);

        let no_type = df!("amount" => [1.0]).unwrap();
        assert!(matches!(
            filter_by_type(&no_type, TransactionType::Income),
            Err(ReportError::MissingColumn(_))
        ));
    }
}
