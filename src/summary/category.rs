//! Per-category totals.

use crate::data::columns::{self, AMOUNT, CATEGORY, TOTAL_AMOUNT, TYPE};
use crate::data::TransactionType;
use crate::error::Result;
use log::debug;
use polars::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOptions {
    pub include_income: bool,
    pub include_expense: bool,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            include_income: true,
            include_expense: true,
        }
    }
}

impl CategoryOptions {
    fn excludes(&self, kind: Option<&str>) -> bool {
        match kind.and_then(TransactionType::from_label) {
            Some(TransactionType::Income) => !self.include_income,
            Some(TransactionType::Expense) => !self.include_expense,
            None => false,
        }
    }
}

/// Group-and-sum `amount` by category in first-appearance order.
/// Null categories form their own group; null amounts are skipped.
pub(crate) fn group_sums(
    categories: &[Option<String>],
    amounts: &[Option<f64>],
    keep: impl Fn(usize) -> bool,
) -> Vec<(Option<String>, f64)> {
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<(Option<String>, f64)> = Vec::new();

    for (i, (category, amount)) in categories.iter().zip(amounts.iter()).enumerate() {
        if !keep(i) {
            continue;
        }
        let key = category.as_deref();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((category.clone(), 0.0));
            groups.len() - 1
        });
        if let Some(amount) = amount {
            groups[slot].1 += amount;
        }
    }

    groups
}

/// Sort by total descending; `sort_by` is stable so ties keep first appearance.
pub(crate) fn sort_descending(groups: &mut [(Option<String>, f64)]) {
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
}

/// Total amount per category, largest first.
///
/// Output columns: ["category", "total_amount"]. When the frame has a `type`
/// column, `options` can drop INCOME or EXPENSE rows before grouping.
pub fn summary_by_category(df: &DataFrame, options: &CategoryOptions) -> Result<DataFrame> {
    columns::require_columns(df, &[CATEGORY, AMOUNT])?;

    let categories = columns::string_values(df.column(CATEGORY)?)?;
    let amounts = columns::amount_values(df.column(AMOUNT)?)?;
    let types = if columns::has_column(df, TYPE) {
        Some(columns::string_values(df.column(TYPE)?)?)
    } else {
        None
    };

    let mut groups = group_sums(&categories, &amounts, |i| match &types {
        Some(types) => !options.excludes(types[i].as_deref()),
        None => true,
    });
    sort_descending(&mut groups);
    debug!("Grouped {} rows into {} categories", df.height(), groups.len());

    let (names, totals): (Vec<Option<String>>, Vec<f64>) = groups.into_iter().unzip();
    let summary = DataFrame::new(vec![
        Column::new(CATEGORY.into(), names),
        Column::new(TOTAL_AMOUNT.into(), totals),
    ])?;
    Ok(summary)
}
