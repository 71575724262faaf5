//! Periodic income, expense and net series.

use crate::data::columns::{self, AMOUNT, DATE, EXPENSE, INCOME, NET, PERIOD, TYPE};
use crate::data::TransactionType;
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Calendar bucket a transaction date is truncated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Quarter,
    Year,
}

/// Sortable bucket: (year, month | quarter | 0). Derived `Ord` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PeriodKey {
    year: i32,
    index: u32,
}

impl Period {
    pub fn key(&self, date: NaiveDate) -> PeriodKey {
        let index = match self {
            Period::Month => date.month(),
            Period::Quarter => (date.month() - 1) / 3 + 1,
            Period::Year => 0,
        };
        PeriodKey {
            year: date.year(),
            index,
        }
    }

    pub fn label(&self, key: PeriodKey) -> String {
        match self {
            Period::Month => format!("{:04}-{:02}", key.year, key.index),
            Period::Quarter => format!("{:04}Q{}", key.year, key.index),
            Period::Year => format!("{:04}", key.year),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        };
        f.write_str(name)
    }
}

/// Income, expense and net per period, oldest first.
///
/// Output columns: ["period", "income", "expense", "net"]. Every dated row
/// contributes its period; a side with no rows in a period is 0.0.
pub fn summary_by_month(df: &DataFrame, period: Period) -> Result<DataFrame> {
    columns::require_columns(df, &[DATE, AMOUNT, TYPE])?;

    let dates = columns::date_values(df.column(DATE)?)?;
    let amounts = columns::amount_values(df.column(AMOUNT)?)?;
    let types = columns::string_values(df.column(TYPE)?)?;

    let mut buckets: BTreeMap<PeriodKey, (f64, f64)> = BTreeMap::new();
    for ((date, amount), kind) in dates.iter().zip(amounts.iter()).zip(types.iter()) {
        let Some(date) = date else {
            continue;
        };
        let bucket = buckets.entry(period.key(*date)).or_insert((0.0, 0.0));
        let Some(amount) = amount else {
            continue;
        };
        match kind.as_deref().and_then(TransactionType::from_label) {
            Some(TransactionType::Income) => bucket.0 += amount,
            Some(TransactionType::Expense) => bucket.1 += amount,
            None => {}
        }
    }

    let mut labels = Vec::with_capacity(buckets.len());
    let mut income = Vec::with_capacity(buckets.len());
    let mut expense = Vec::with_capacity(buckets.len());
    let mut net = Vec::with_capacity(buckets.len());
    for (key, (inc, exp)) in buckets {
        labels.push(period.label(key));
        income.push(inc);
        expense.push(exp);
        net.push(inc - exp);
    }

    let summary = DataFrame::new(vec![
        Column::new(PERIOD.into(), labels),
        Column::new(INCOME.into(), income),
        Column::new(EXPENSE.into(), expense),
        Column::new(NET.into(), net),
    ])?;
    Ok(summary)
}
