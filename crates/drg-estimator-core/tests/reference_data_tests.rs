//! Reference data loading tests.

use std::fs;

use drg_estimator_core::models::{BreakdownCategory, DEFAULT_WEIGHT};
use drg_estimator_core::{
    CatalogWarning, CodeSearch, DataLoadError, Estimator, EstimatorConfig, ReferenceData,
};
use tempfile::TempDir;

const COSTS: &str = include_str!("fixtures/drg_costs.json");
const LABELS: &str = include_str!("fixtures/drg_labels.json");

fn write_tables(dir: &TempDir, costs: &str, labels: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let costs_path = dir.path().join("drg_costs.json");
    let labels_path = dir.path().join("drg_labels.json");
    fs::write(&costs_path, costs).unwrap();
    fs::write(&labels_path, labels).unwrap();
    (costs_path, labels_path)
}

#[test]
fn test_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let (costs_path, labels_path) = write_tables(&dir, COSTS, LABELS);

    let data = ReferenceData::load(&costs_path, &labels_path).unwrap();

    assert_eq!(data.len(), 6);
    assert_eq!(data.codes()[0].code, "X01");
    assert_eq!(data.get("O01C").unwrap().weight, 0.803);
    assert_eq!(
        data.get("O01C").unwrap().breakdown[&BreakdownCategory::DeliveryRoom],
        0.221
    );
    assert_eq!(data.label("O01C", "ar"), "عملية قيصرية");
    assert_eq!(data.label("I47B", "ar"), "Hip replacement");
}

#[test]
fn test_fixture_warnings() {
    let data = ReferenceData::from_json_str(COSTS, LABELS).unwrap();

    assert_eq!(data.get("R61C").unwrap().weight, DEFAULT_WEIGHT);
    assert_eq!(data.get("R61C").unwrap().breakdown.len(), 1);
    assert_eq!(
        data.warnings(),
        &[
            CatalogWarning::WeightDefaulted {
                code: "R61C".into(),
                raw: "\"tbd\"".into(),
            },
            CatalogWarning::UnknownCategory {
                code: "R61C".into(),
                category: "pharmacy".into(),
            },
        ]
    );
}

#[test]
fn test_missing_labels_file() {
    let dir = TempDir::new().unwrap();
    let (costs_path, _) = write_tables(&dir, COSTS, LABELS);
    let missing = dir.path().join("missing.json");

    let result = ReferenceData::load(&costs_path, &missing);
    assert!(matches!(result, Err(DataLoadError::Io { .. })));
}

#[test]
fn test_corrupt_costs_file() {
    let dir = TempDir::new().unwrap();
    let (costs_path, labels_path) = write_tables(&dir, "[{\"code\": \"X01\",", LABELS);

    let result = ReferenceData::load(&costs_path, &labels_path);
    assert!(matches!(result, Err(DataLoadError::Json(_))));
}

#[test]
fn test_failed_load_gives_unavailable_estimator() {
    let dir = TempDir::new().unwrap();
    let (_, labels_path) = write_tables(&dir, COSTS, LABELS);

    let load = ReferenceData::load(dir.path().join("gone.json"), &labels_path);
    let estimator = Estimator::new(load, EstimatorConfig::default());

    assert!(!estimator.is_available());
    assert!(estimator.session().is_none());
    assert!(estimator.unavailable_reason().unwrap().contains("gone.json"));
}

#[test]
fn test_search_fixture_catalog() {
    let data = ReferenceData::from_json_str(COSTS, LABELS).unwrap();
    let search = CodeSearch::new(&data);

    let found: Vec<&str> = search
        .search("СЕЧЕНИЕ", "ru")
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(found, vec!["O01C"]);

    let found: Vec<&str> = search
        .search("leukaemia", "pl")
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(found, vec!["R61C"]);

    assert!(search.search("", "en").is_empty());
    assert!(search.search("transplant", "en").is_empty());
}
