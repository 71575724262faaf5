//! Data module - CSV loading and cleaning

pub mod columns;
mod cleaner;
mod loader;

pub use cleaner::{
    clean_transactions, filter_by_type, CleanOptions, TransactionType, TypeMap,
    DEFAULT_REQUIRED_COLUMNS, DEFAULT_TYPE_MAP,
};
pub use loader::{read_transactions, DEFAULT_ENCODING};
