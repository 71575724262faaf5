//! Chart Plotter Module
//! Builds report figures from transaction frames and summary views.

use crate::charts::figure::{Axes, Figure, PlotKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::data::columns::{self, AMOUNT, CATEGORY, NET, PERIOD};
use crate::error::Result;
use crate::summary::{group_sums, sort_descending};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for CategoryChartOptions {
    fn default() -> Self {
        Self {
            title: "Spending by Category".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_col: String,
    pub y_col: String,
    pub width: u32,
    pub height: u32,
}

impl Default for BalanceChartOptions {
    fn default() -> Self {
        Self {
            title: "Net Balance Over Time".to_string(),
            x_label: "Period".to_string(),
            y_label: "Net Amount".to_string(),
            x_col: PERIOD.to_string(),
            y_col: NET.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Bar chart of absolute spending per category, largest first.
///
/// Re-aggregates `amount` by `category`; rows without a category or amount are
/// left out of the chart.
pub fn plot_spending_by_category(df: &DataFrame, options: &CategoryChartOptions) -> Result<Figure> {
    columns::require_columns(df, &[CATEGORY, AMOUNT])?;

    let categories = columns::string_values(df.column(CATEGORY)?)?;
    let amounts = columns::amount_values(df.column(AMOUNT)?)?;

    let mut groups: Vec<(Option<String>, f64)> =
        group_sums(&categories, &amounts, |i| categories[i].is_some() && amounts[i].is_some())
            .into_iter()
            .map(|(name, total)| (name, total.abs()))
            .collect();
    sort_descending(&mut groups);

    let (x_ticks, values): (Vec<String>, Vec<f64>) = groups
        .into_iter()
        .map(|(name, total)| (name.unwrap_or_default(), total))
        .unzip();

    let axes = Axes {
        kind: PlotKind::Bar,
        title: options.title.clone(),
        x_label: "Category".to_string(),
        y_label: "Total Amount".to_string(),
        x_ticks,
        values,
        rotate_x_ticks: false,
    };
    Ok(Figure::new(axes).with_size(options.width, options.height))
}

/// Line chart of a periodic series, plotted row by row without aggregation.
pub fn plot_balance_over_time(df: &DataFrame, options: &BalanceChartOptions) -> Result<Figure> {
    columns::require_columns(df, &[options.x_col.as_str(), options.y_col.as_str()])?;

    let x_values = columns::string_values(df.column(&options.x_col)?)?;
    let y_values = columns::amount_values(df.column(&options.y_col)?)?;

    let (x_ticks, values): (Vec<String>, Vec<f64>) = x_values
        .into_iter()
        .zip(y_values)
        .filter_map(|(x, y)| y.map(|y| (x.unwrap_or_default(), y)))
        .unzip();

    let axes = Axes {
        kind: PlotKind::Line,
        title: options.title.clone(),
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        x_ticks,
        values,
        rotate_x_ticks: true,
    };
    Ok(Figure::new(axes).with_size(options.width, options.height))
}
