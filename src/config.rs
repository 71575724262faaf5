//! Report configuration loaded from a JSON file.

use crate::charts::{BalanceChartOptions, CategoryChartOptions};
use crate::data::{CleanOptions, TypeMap, DEFAULT_ENCODING, DEFAULT_REQUIRED_COLUMNS};
use crate::error::Result;
use crate::summary::{CategoryOptions, Period};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub encoding: String,
    /// Overrides the built-in type mapping when present.
    pub type_map: Option<BTreeMap<String, String>>,
    pub required_columns: Vec<String>,
    pub period: Period,
    pub include_income: bool,
    pub include_expense: bool,
    pub category_chart: CategoryChartOptions,
    pub balance_chart: BalanceChartOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            type_map: None,
            required_columns: DEFAULT_REQUIRED_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            period: Period::default(),
            include_income: true,
            include_expense: true,
            category_chart: CategoryChartOptions::default(),
            balance_chart: BalanceChartOptions::default(),
        }
    }
}

impl ReportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            type_map: self.type_map.as_ref().map(TypeMap::new),
            required_columns: self.required_columns.clone(),
        }
    }

    pub fn category_options(&self) -> CategoryOptions {
        CategoryOptions {
            include_income: self.include_income,
            include_expense: self.include_expense,
        }
    }
}
