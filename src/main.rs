//! finreport - CSV transaction report
//!
//! Loads a transactions CSV, prints the summary views and optionally saves the
//! report charts.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use finreport::data::{columns, filter_by_type};
use finreport::{
    clean_transactions, compute_income_expense_summary, plot_balance_over_time,
    plot_spending_by_category, read_transactions, summary_by_category, summary_by_month, Period,
    ReportConfig, TransactionType,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Transactions CSV file
    file: PathBuf,

    /// Text encoding of the CSV file (overrides the config file)
    #[clap(long)]
    encoding: Option<String>,

    /// JSON report configuration
    #[clap(long)]
    config: Option<PathBuf>,

    /// Period granularity for the balance series
    #[clap(long, value_enum)]
    period: Option<Period>,

    /// Leave INCOME rows out of the category summary
    #[clap(long)]
    exclude_income: bool,

    /// Leave EXPENSE rows out of the category summary
    #[clap(long)]
    exclude_expense: bool,

    /// Directory to save the report charts into
    #[clap(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }
    if let Some(period) = cli.period {
        config.period = period;
    }
    if cli.exclude_income {
        config.include_income = false;
    }
    if cli.exclude_expense {
        config.include_expense = false;
    }

    let raw = read_transactions(&cli.file, &config.encoding)?;
    let cleaned = clean_transactions(&raw, &config.clean_options())?;

    let totals = compute_income_expense_summary(&cleaned)?;
    println!("Income / expense totals\n{totals}");

    let by_category = summary_by_category(&cleaned, &config.category_options())?;
    println!("By category\n{by_category}");

    let by_period = summary_by_month(&cleaned, config.period)?;
    println!("By {}\n{by_period}", config.period);

    if let Some(out_dir) = &cli.out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;

        let spending = if columns::has_column(&cleaned, columns::TYPE) {
            filter_by_type(&cleaned, TransactionType::Expense)?
        } else {
            cleaned.clone()
        };
        plot_spending_by_category(&spending, &config.category_chart)?
            .save(out_dir.join("spending_by_category.svg"))?;
        plot_balance_over_time(&by_period, &config.balance_chart)?
            .save(out_dir.join("balance_over_time.svg"))?;

        info!("Charts written to {}", out_dir.display());
    }

    Ok(())
}
