//! Column names and typed accessors shared by every pipeline stage.
//! Each entry point checks the columns it needs up front.

use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use polars::prelude::*;

pub const DATE: &str = "date";
pub const AMOUNT: &str = "amount";
pub const TYPE: &str = "type";
pub const CATEGORY: &str = "category";

pub const LABEL: &str = "label";
pub const TOTAL_AMOUNT: &str = "total_amount";
pub const PERIOD: &str = "period";
pub const INCOME: &str = "income";
pub const EXPENSE: &str = "expense";
pub const NET: &str = "net";

/// Formats tried, in order, when a date arrives as text.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// True when `df` has a column called `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Fail with every column of `required` that `df` lacks, not just the first.
pub fn require_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !has_column(df, c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReportError::MissingColumn(missing))
    }
}

/// Parse a single date cell; `None` for anything unrecognised.
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
                .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parse a single amount cell; NaN counts as missing.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Read a column as dates, whatever its physical type.
pub fn date_values(column: &Column) -> Result<Vec<Option<NaiveDate>>> {
    match column.dtype() {
        DataType::Date | DataType::Datetime(_, _) => {
            let dates = column.cast(&DataType::Date)?;
            let ca = dates.as_materialized_series().date()?;
            Ok(ca.as_date_iter().collect())
        }
        _ => {
            let text = column.cast(&DataType::String)?;
            let ca = text.as_materialized_series().str()?;
            Ok(ca.into_iter().map(|v| v.and_then(parse_date)).collect())
        }
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Read a column as amounts, whatever its physical type.
pub fn amount_values(column: &Column) -> Result<Vec<Option<f64>>> {
    if is_numeric(column.dtype()) {
        let values = column.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
    } else {
        let text = column.cast(&DataType::String)?;
        let ca = text.as_materialized_series().str()?;
        Ok(ca.into_iter().map(|v| v.and_then(parse_amount)).collect())
    }
}

/// Read a column as owned strings, keeping nulls.
pub fn string_values(column: &Column) -> Result<Vec<Option<String>>> {
    let text = column.cast(&DataType::String)?;
    let ca = text.as_materialized_series().str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}
