//! Integration tests loading the on-disk schedule fixture and running it
//! through the engine.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{CalculationInput, TaxEngine, TaxRegime, TaxpayerCategory};
use tax_data::{ScheduleLoader, ScheduleLoaderError};

const TEST_CSV_2025: &str = include_str!("../test-data/schedules_2025.csv");

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join("schedules_2025.csv")
}

#[test]
fn test_fixture_parses_all_rows() {
    let records = ScheduleLoader::parse(TEST_CSV_2025.as_bytes()).expect("Failed to parse CSV");

    assert_eq!(records.len(), 9);
    assert_eq!(records.iter().filter(|r| r.category == "individual").count(), 7);
    assert_eq!(records.iter().filter(|r| r.category == "business").count(), 2);
}

#[test]
fn test_load_file_matches_built_in_regime() {
    let regime = ScheduleLoader::load_file(&fixture_path(), dec!(0.04)).expect("fixture loads");

    assert_eq!(regime, TaxRegime::nigeria_2025().unwrap());
}

#[test]
fn test_loaded_regime_drives_the_engine() {
    let regime = ScheduleLoader::load_file(&fixture_path(), dec!(0.04)).unwrap();
    let engine = TaxEngine::new(regime).unwrap();

    let result = engine.calculate(&CalculationInput {
        gross_amount: dec!(25000000),
        reliefs: dec!(0),
        category: TaxpayerCategory::Individual,
    });

    assert_eq!(result.total_tax, dec!(4814000));
}

#[test]
fn test_edited_rate_changes_the_result_without_code_changes() {
    let edited = TEST_CSV_2025.replace("NG-2025,individual,1500000,0.07", "NG-2025,individual,1500000,0.08");
    let records = ScheduleLoader::parse(edited.as_bytes()).unwrap();
    let engine = TaxEngine::new(ScheduleLoader::build(&records, dec!(0.04)).unwrap()).unwrap();

    let result = engine.calculate(&CalculationInput {
        gross_amount: dec!(1000000),
        reliefs: dec!(0),
        category: TaxpayerCategory::Individual,
    });

    assert_eq!(result.base_tax, dec!(16000));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = ScheduleLoader::load_file(Path::new("does/not/exist.csv"), dec!(0.04));

    assert!(matches!(result, Err(ScheduleLoaderError::Io { .. })));
}
