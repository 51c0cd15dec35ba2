//! Reference data store: the costs and labels tables.

mod parse;

pub use parse::*;

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::models::{LabelTable, TreatmentCode};

/// Reference data errors.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid reference data: {0}")]
    Format(String),

    #[error("Duplicate treatment code: {0}")]
    DuplicateCode(String),
}

pub type DataResult<T> = Result<T, DataLoadError>;

/// Catalog and labels, read-only once loaded.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    codes: Vec<TreatmentCode>,
    index: HashMap<String, usize>,
    labels: LabelTable,
    warnings: Vec<CatalogWarning>,
}

impl ReferenceData {
    /// Load both tables from disk.
    pub fn load<C: AsRef<Path>, L: AsRef<Path>>(costs_path: C, labels_path: L) -> DataResult<Self> {
        let costs = read_resource(costs_path.as_ref())?;
        let labels = read_resource(labels_path.as_ref())?;
        Self::from_json_str(&costs, &labels)
    }

    /// Build from the raw JSON text of both tables.
    pub fn from_json_str(costs_json: &str, labels_json: &str) -> DataResult<Self> {
        let mut warnings = Vec::new();
        let codes = parse_costs(costs_json, &mut warnings)?;
        let labels = parse_labels(labels_json, &mut warnings)?;
        Self::assemble(codes, labels, warnings)
    }

    /// Build from already-decoded parts.
    pub fn from_parts(codes: Vec<TreatmentCode>, labels: LabelTable) -> DataResult<Self> {
        Self::assemble(codes, labels, Vec::new())
    }

    fn assemble(
        codes: Vec<TreatmentCode>,
        labels: LabelTable,
        mut warnings: Vec<CatalogWarning>,
    ) -> DataResult<Self> {
        let mut index = HashMap::with_capacity(codes.len());
        for (position, item) in codes.iter().enumerate() {
            if index.insert(item.code.clone(), position).is_some() {
                return Err(DataLoadError::DuplicateCode(item.code.clone()));
            }
        }

        for item in &codes {
            if !labels.has_english(&item.code) {
                warnings.push(CatalogWarning::MissingEnglishLabel {
                    code: item.code.clone(),
                });
            }
        }

        let mut orphans: Vec<&str> = labels.codes().filter(|c| !index.contains_key(*c)).collect();
        orphans.sort_unstable();
        warnings.extend(orphans.into_iter().map(|code| CatalogWarning::OrphanLabel {
            code: code.to_string(),
        }));

        for warning in &warnings {
            warn!("reference data: {}", warning);
        }
        info!(
            "Loaded {} treatment codes, labels for {} codes ({} warnings)",
            codes.len(),
            labels.len(),
            warnings.len()
        );

        Ok(Self {
            codes,
            index,
            labels,
            warnings,
        })
    }

    /// All codes in catalog order.
    pub fn codes(&self) -> &[TreatmentCode] {
        &self.codes
    }

    /// Get a treatment code by its exact code.
    pub fn get(&self, code: &str) -> Option<&TreatmentCode> {
        self.index.get(code).map(|&position| &self.codes[position])
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Display label for a code in a locale (locale → English → code).
    pub fn label<'a>(&'a self, code: &'a str, locale: &str) -> &'a str {
        self.labels.label(code, locale)
    }

    /// Problems found while loading that did not stop the load.
    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn read_resource(path: &Path) -> DataResult<String> {
    std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
