//! CSV Transaction Loader
//! Decodes the input file and parses it into a polars DataFrame.

use crate::error::{ReportError, Result};
use encoding_rs::Encoding;
use log::{debug, info};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

pub const DEFAULT_ENCODING: &str = "utf-8";

/// Load a transactions CSV.
///
/// Every column comes back as `String`; typing is left to the cleaner so that a
/// malformed cell never aborts the import.
pub fn read_transactions<P: AsRef<Path>>(path: P, encoding: &str) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ReportError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let text = decode(path, &bytes, encoding)?;
    // Header line only (or nothing at all) means no records.
    if text.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(ReportError::EmptyDataset(path.to_path_buf()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| parse_error(path, e))?;

    if df.height() == 0 {
        return Err(ReportError::EmptyDataset(path.to_path_buf()));
    }

    info!(
        "Loaded {} rows, {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Decode raw bytes to UTF-8 text. A BOM overrides the requested label.
fn decode(path: &Path, bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| parse_error(path, format!("unknown encoding '{label}'")))?;

    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) => (bom_encoding, &bytes[bom_len..]),
        None => (encoding, bytes),
    };
    debug!("Decoding {} as {}", path.display(), encoding.name());

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| parse_error(path, format!("content is not valid {}", encoding.name())))
}

fn parse_error(path: &Path, reason: impl ToString) -> ReportError {
    ReportError::Parse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
