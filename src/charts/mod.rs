//! Charts module - report figures and rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{Axes, Figure, PlotKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use plotter::{
    plot_balance_over_time, plot_spending_by_category, BalanceChartOptions, CategoryChartOptions,
};
pub use renderer::StaticChartRenderer;
