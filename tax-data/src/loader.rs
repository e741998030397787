use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketSchedule, ScheduleError, TaxBracket, TaxRegime, TaxpayerCategory};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading schedule data.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid category '{category}' on row {row}")]
    InvalidCategory { category: String, row: usize },

    #[error("No brackets defined for category '{0}'")]
    MissingCategory(&'static str),

    #[error("File mixes regimes '{0}' and '{1}'")]
    MixedRegimes(String, String),

    #[error("No schedule rows found")]
    Empty,

    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a schedule CSV file.
///
/// - `regime`: label shared by every row of the file (e.g. `NG-2025`)
/// - `category`: `individual` or `business`
/// - `upper_bound`: inclusive top of the band (empty for unbounded)
/// - `rate`: marginal rate as a decimal (e.g. 0.07 for 7%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    pub regime: String,
    pub category: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedules stored as CSV.
///
/// Rows for each category must appear in ascending band order; the resulting
/// schedules go through the same validation as the built-in tables.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse schedule records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScheduleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a [`TaxRegime`] from parsed records.
    ///
    /// Every row must carry the same regime label, and both categories must
    /// be present. `development_levy_rate` is not part of the table and is
    /// supplied by the caller.
    pub fn build(
        records: &[ScheduleRecord],
        development_levy_rate: Decimal,
    ) -> Result<TaxRegime, ScheduleLoaderError> {
        let first = records.first().ok_or(ScheduleLoaderError::Empty)?;
        let label = first.regime.clone();

        let mut individual = Vec::new();
        let mut small_business = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if record.regime != label {
                return Err(ScheduleLoaderError::MixedRegimes(
                    label,
                    record.regime.clone(),
                ));
            }

            let category = TaxpayerCategory::parse(&record.category).ok_or_else(|| {
                ScheduleLoaderError::InvalidCategory {
                    category: record.category.clone(),
                    row: index + 1,
                }
            })?;

            let bracket = TaxBracket {
                upper_bound: record.upper_bound,
                marginal_rate: record.rate,
            };
            match category {
                TaxpayerCategory::Individual => individual.push(bracket),
                TaxpayerCategory::SmallBusiness => small_business.push(bracket),
            }
        }

        if individual.is_empty() {
            return Err(ScheduleLoaderError::MissingCategory(
                TaxpayerCategory::Individual.as_str(),
            ));
        }
        if small_business.is_empty() {
            return Err(ScheduleLoaderError::MissingCategory(
                TaxpayerCategory::SmallBusiness.as_str(),
            ));
        }

        let regime = TaxRegime {
            label,
            individual: BracketSchedule::new(individual)?,
            small_business: BracketSchedule::new(small_business)?,
            development_levy_rate,
        };
        regime.validate()?;

        debug!(
            regime = %regime.label,
            individual_bands = regime.individual.len(),
            business_bands = regime.small_business.len(),
            "schedule loaded"
        );

        Ok(regime)
    }

    /// Parse and build a regime from the CSV file at `path`.
    pub fn load_file(
        path: &Path,
        development_levy_rate: Decimal,
    ) -> Result<TaxRegime, ScheduleLoaderError> {
        let file = File::open(path).map_err(|source| ScheduleLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let records = Self::parse(file)?;
        Self::build(&records, development_levy_rate)
    }
}
