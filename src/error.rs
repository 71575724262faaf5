//! Error types shared by the loader, cleaner, summaries and charts.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Transactions file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read CSV from {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Transactions file {0} is empty")]
    EmptyDataset(PathBuf),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumn(Vec<String>),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
