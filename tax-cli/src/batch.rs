//! CSV loader for batches of calculation inputs.
//!
//! ## CSV Format
//!
//! | Column         | Required | Type    | Notes                                   |
//! |----------------|----------|---------|-----------------------------------------|
//! | `category`     | yes      | string  | `individual` or `business`              |
//! | `gross_amount` | no       | decimal | Leave cell empty for 0                  |
//! | `reliefs`      | no       | decimal | Leave cell empty for 0                  |
//!
//! Headers are matched by name, so column order does not matter.
//!
//! ```csv
//! category,gross_amount,reliefs
//! individual,1000000.00,
//! business,60000000.00,5000000.00
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{CalculationInput, TaxpayerCategory};

#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    gross_amount: Option<Decimal>,
    reliefs: Option<Decimal>,
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    /// Bad structure, missing column or a cell that is not a number.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("unrecognised category '{category}' on row {row}")]
    InvalidCategory { category: String, row: usize },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<CalculationInput, BatchLoadError> {
    let category = TaxpayerCategory::parse(&row.category).ok_or_else(|| {
        BatchLoadError::InvalidCategory {
            category: row.category,
            row: row_number,
        }
    })?;

    Ok(CalculationInput {
        gross_amount: row.gross_amount.unwrap_or_default(),
        reliefs: row.reliefs.unwrap_or_default(),
        category,
    })
}

/// Parses CSV text into calculation inputs, in file order.
///
/// # Errors
///
/// * [`BatchLoadError::Parse`] if the CSV is structurally invalid or an
///   amount cannot be read.
/// * [`BatchLoadError::InvalidCategory`] for an unknown category.
pub fn load_from_str(input: &str) -> Result<Vec<CalculationInput>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads `path` and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<CalculationInput>, BatchLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BatchLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
