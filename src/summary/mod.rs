//! Summary module - aggregate views over a cleaned transactions frame

mod category;
mod period;
mod totals;

pub use category::{summary_by_category, CategoryOptions};
pub(crate) use category::{group_sums, sort_descending};
pub use period::{summary_by_month, Period, PeriodKey};
pub use totals::compute_income_expense_summary;
