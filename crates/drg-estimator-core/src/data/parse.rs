//! Decoding of the costs and labels tables.
//!
//! Both tables are hand-maintained, so decoding is lenient where a bad
//! value only affects one entry (weights, coefficients, single labels)
//! and strict where the shape of the table is wrong.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DataLoadError, DataResult};
use crate::models::{usable_weight, BreakdownCategory, LabelTable, TreatmentCode, DEFAULT_WEIGHT};

/// Non-fatal problem found while loading reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogWarning {
    /// Weight missing, zero or non-numeric; 1 is used instead
    WeightDefaulted { code: String, raw: String },
    /// Breakdown key outside the fixed category set
    UnknownCategory { code: String, category: String },
    /// Breakdown coefficient that is not a number
    InvalidCoefficient { code: String, category: BreakdownCategory, raw: String },
    /// Breakdown present but not an object
    MalformedBreakdown { code: String },
    /// Catalog code with no English label
    MissingEnglishLabel { code: String },
    /// Label entry for a code the catalog does not contain
    OrphanLabel { code: String },
    /// Label value that is not a string
    InvalidLabel { code: String, locale: String },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightDefaulted { code, raw } => {
                write!(f, "{}: unusable weight {}, defaulting to {}", code, raw, DEFAULT_WEIGHT)
            }
            Self::UnknownCategory { code, category } => {
                write!(f, "{}: unknown breakdown category {:?}", code, category)
            }
            Self::InvalidCoefficient { code, category, raw } => {
                write!(f, "{}: non-numeric {} coefficient {}", code, category, raw)
            }
            Self::MalformedBreakdown { code } => write!(f, "{}: breakdown is not an object", code),
            Self::MissingEnglishLabel { code } => write!(f, "{}: no English label", code),
            Self::OrphanLabel { code } => write!(f, "{}: label for unknown code", code),
            Self::InvalidLabel { code, locale } => {
                write!(f, "{}: {} label is not a string", code, locale)
            }
        }
    }
}

/// Read a number that may have been written as a JSON string.
pub fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Decode the costs table: an array of `{code, weight, breakdown}`.
pub fn parse_costs(json: &str, warnings: &mut Vec<CatalogWarning>) -> DataResult<Vec<TreatmentCode>> {
    let root: Value = serde_json::from_str(json)?;
    let entries = root
        .as_array()
        .ok_or_else(|| DataLoadError::Format("costs table must be a JSON array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_cost_entry(index, entry, warnings))
        .collect()
}

fn parse_cost_entry(
    index: usize,
    entry: &Value,
    warnings: &mut Vec<CatalogWarning>,
) -> DataResult<TreatmentCode> {
    let object = entry
        .as_object()
        .ok_or_else(|| DataLoadError::Format(format!("costs entry {} is not an object", index)))?;

    let code = object
        .get("code")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| DataLoadError::Format(format!("costs entry {} has no code", index)))?
        .to_string();

    let raw_weight = object.get("weight").unwrap_or(&Value::Null);
    let weight = match lenient_number(raw_weight).and_then(usable_weight) {
        Some(w) => w,
        None => {
            warnings.push(CatalogWarning::WeightDefaulted {
                code: code.clone(),
                raw: raw_weight.to_string(),
            });
            DEFAULT_WEIGHT
        }
    };

    let breakdown = match object.get("breakdown") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => parse_breakdown(&code, map, warnings),
        Some(_) => {
            warnings.push(CatalogWarning::MalformedBreakdown { code: code.clone() });
            BTreeMap::new()
        }
    };

    Ok(TreatmentCode {
        code,
        weight,
        breakdown,
    })
}

fn parse_breakdown(
    code: &str,
    map: &Map<String, Value>,
    warnings: &mut Vec<CatalogWarning>,
) -> BTreeMap<BreakdownCategory, f64> {
    let mut breakdown = BTreeMap::new();

    for (key, value) in map {
        let Some(category) = BreakdownCategory::from_key(key) else {
            warnings.push(CatalogWarning::UnknownCategory {
                code: code.to_string(),
                category: key.clone(),
            });
            continue;
        };

        match lenient_number(value) {
            Some(coefficient) => {
                breakdown.insert(category, coefficient);
            }
            None => warnings.push(CatalogWarning::InvalidCoefficient {
                code: code.to_string(),
                category,
                raw: value.to_string(),
            }),
        }
    }

    breakdown
}

/// Decode the labels table: `{code: {locale: text}}`.
pub fn parse_labels(json: &str, warnings: &mut Vec<CatalogWarning>) -> DataResult<LabelTable> {
    let root: Value = serde_json::from_str(json)?;
    let codes = root
        .as_object()
        .ok_or_else(|| DataLoadError::Format("labels table must be a JSON object".into()))?;

    let mut labels = LabelTable::new();
    for (code, by_locale) in codes {
        let by_locale = by_locale.as_object().ok_or_else(|| {
            DataLoadError::Format(format!("labels for {} must be an object keyed by locale", code))
        })?;

        for (locale, text) in by_locale {
            match text.as_str() {
                Some(text) => labels.insert(code.clone(), locale, text),
                None => warnings.push(CatalogWarning::InvalidLabel {
                    code: code.clone(),
                    locale: locale.clone(),
                }),
            }
        }
    }

    Ok(labels)
}
