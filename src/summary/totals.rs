//! Income, expense and net totals.

use crate::data::columns::{self, AMOUNT, LABEL, TOTAL_AMOUNT, TYPE};
use crate::data::TransactionType;
use crate::error::Result;
use polars::prelude::*;

/// Sum amounts per canonical type; the NET row is income minus expense.
///
/// Output columns: ["label", "total_amount"], rows INCOME, EXPENSE, NET.
pub fn compute_income_expense_summary(df: &DataFrame) -> Result<DataFrame> {
    columns::require_columns(df, &[AMOUNT, TYPE])?;

    let amounts = columns::amount_values(df.column(AMOUNT)?)?;
    let types = columns::string_values(df.column(TYPE)?)?;

    let mut income = 0.0;
    let mut expense = 0.0;
    for (kind, amount) in types.iter().zip(amounts.iter()) {
        let (Some(kind), Some(amount)) = (kind, amount) else {
            continue;
        };
        match TransactionType::from_label(kind) {
            Some(TransactionType::Income) => income += amount,
            Some(TransactionType::Expense) => expense += amount,
            None => {}
        }
    }
    let net = income - expense;

    let summary = DataFrame::new(vec![
        Column::new(LABEL.into(), vec!["INCOME", "EXPENSE", "NET"]),
        Column::new(TOTAL_AMOUNT.into(), vec![income, expense, net]),
    ])?;
    Ok(summary)
}
