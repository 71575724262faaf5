//! finreport - CSV Transaction Cleaning, Summaries & Report Charts
//!
//! Pipeline: `read_transactions` → `clean_transactions` → summary views →
//! chart figures.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod summary;

pub use charts::{
    plot_balance_over_time, plot_spending_by_category, BalanceChartOptions, CategoryChartOptions,
    Figure,
};
pub use config::ReportConfig;
pub use data::{clean_transactions, read_transactions, CleanOptions, TransactionType, TypeMap};
pub use error::{ReportError, Result};
pub use summary::{
    compute_income_expense_summary, summary_by_category, summary_by_month, CategoryOptions, Period,
};
