//! DRG Estimator Core Library
//!
//! Treatment cost estimator for the medical-tourism site: DRG weight ×
//! base rate plus day-based charges, itemized and localized.
//!
//! # Architecture
//!
//! ```text
//! costs.json ──┐
//!              ├─→ ReferenceData ─→ CodeSearch ─→ selected code
//! labels.json ─┘         │                             │
//!                        │        EstimateForm ─→ EstimateInput
//!                        │                             │
//!                        │                     compute (pure)
//!                        │                             │
//!                        └──────→ render ←──── EstimateResult
//!                                    │
//!                          RenderedEstimate / JSON / CSV
//! ```
//!
//! # Modules
//!
//! - [`data`]: loading of the costs and labels tables
//! - [`models`]: domain types (TreatmentCode, LabelTable, EstimateInput, ...)
//! - [`search`]: code lookup by code or localized label
//! - [`calculator`]: the cost formula
//! - [`export`]: localized formatting and JSON/CSV export
//! - [`session`]: form staging for interactive front-ends
//! - [`config`]: currency, locale and default-rate settings

pub mod calculator;
pub mod config;
pub mod data;
pub mod export;
pub mod models;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use calculator::{compute, EstimateError, MIN_BILLABLE_STAY_DAYS};
pub use config::EstimatorConfig;
pub use data::{CatalogWarning, DataLoadError, ReferenceData};
pub use export::{render, EstimateExport, RenderedEstimate};
pub use models::{
    BreakdownCategory, BreakdownLine, EstimateInput, EstimateResult, LabelTable, Locale,
    TreatmentCode,
};
pub use search::CodeSearch;
pub use session::{EstimateForm, Estimator, EstimatorSession};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum EstimatorError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Missing selection: {0}")]
    MissingSelection(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<DataLoadError> for EstimatorError {
    fn from(e: DataLoadError) -> Self {
        EstimatorError::DataUnavailable(e.to_string())
    }
}

impl From<EstimateError> for EstimatorError {
    fn from(e: EstimateError) -> Self {
        match e {
            EstimateError::MissingSelection => EstimatorError::MissingSelection(e.to_string()),
            EstimateError::InvalidRate => EstimatorError::InvalidRate(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for EstimatorError {
    fn from(e: serde_json::Error) -> Self {
        EstimatorError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for EstimatorError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        EstimatorError::InvalidInput(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Load reference data from disk. A failed load yields an estimator in the
/// unavailable state rather than an error.
#[uniffi::export]
pub fn open_estimator(costs_path: String, labels_path: String) -> Arc<DrgEstimator> {
    let load = ReferenceData::load(&costs_path, &labels_path);
    Arc::new(DrgEstimator::new(Estimator::new(load, EstimatorConfig::default())))
}

/// Build an estimator from the JSON text of both tables.
#[uniffi::export]
pub fn open_estimator_from_json(costs_json: String, labels_json: String) -> Arc<DrgEstimator> {
    let load = ReferenceData::from_json_str(&costs_json, &labels_json);
    Arc::new(DrgEstimator::new(Estimator::new(load, EstimatorConfig::default())))
}

/// Load reference data from disk with a JSON config.
#[uniffi::export]
pub fn open_estimator_with_config(
    costs_path: String,
    labels_path: String,
    config_json: String,
) -> Result<Arc<DrgEstimator>, EstimatorError> {
    let config = EstimatorConfig::from_json_str(&config_json)?;
    let load = ReferenceData::load(&costs_path, &labels_path);
    Ok(Arc::new(DrgEstimator::new(Estimator::new(load, config))))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe estimator wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DrgEstimator {
    estimator: Estimator,
    session: Mutex<Option<EstimatorSession>>,
}

impl DrgEstimator {
    fn new(estimator: Estimator) -> Self {
        let session = estimator.session();
        Self {
            estimator,
            session: Mutex::new(session),
        }
    }

    fn with_session<T>(
        &self,
        f: impl FnOnce(&mut EstimatorSession) -> Result<T, EstimatorError>,
    ) -> Result<T, EstimatorError> {
        let mut guard = self.session.lock()?;
        match guard.as_mut() {
            Some(session) => f(session),
            None => Err(EstimatorError::DataUnavailable(
                self.estimator
                    .unavailable_reason()
                    .unwrap_or("reference data not loaded")
                    .to_string(),
            )),
        }
    }
}

#[uniffi::export]
impl DrgEstimator {
    // =========================================================================
    // State
    // =========================================================================

    /// Whether reference data loaded.
    pub fn is_available(&self) -> bool {
        self.estimator.is_available()
    }

    /// Why reference data is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<String> {
        self.estimator.unavailable_reason().map(str::to_string)
    }

    /// Localized "data unavailable" notice.
    pub fn unavailable_message(&self, locale: String) -> String {
        export::unavailable_message(Locale::parse_or_default(&locale)).to_string()
    }

    /// Non-fatal problems found while loading reference data.
    pub fn load_warnings(&self) -> Vec<String> {
        self.estimator
            .data()
            .map(|data| data.warnings().iter().map(|w| w.to_string()).collect())
            .unwrap_or_default()
    }

    /// Switch the session locale (unsupported locales fall back to English).
    pub fn set_locale(&self, locale: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_locale(Locale::parse_or_default(&locale));
            Ok(())
        })
    }

    // =========================================================================
    // Code Lookup
    // =========================================================================

    /// Search codes by code or label in the session locale.
    pub fn search_codes(&self, query: String) -> Result<Vec<FfiCodeMatch>, EstimatorError> {
        self.with_session(|session| {
            session.set_query(query);
            let locale = session.locale().code();
            let matches = session
                .matches()
                .into_iter()
                .map(|item| FfiCodeMatch {
                    code: item.code.clone(),
                    label: session.data().label(&item.code, locale).to_string(),
                    weight: item.weight,
                })
                .collect();
            Ok(matches)
        })
    }

    /// Select a code. Returns false if the code is not in the catalog.
    pub fn select_code(&self, code: String) -> Result<bool, EstimatorError> {
        self.with_session(|session| Ok(session.select(&code)))
    }

    pub fn clear_selection(&self) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.clear_selection();
            Ok(())
        })
    }

    // =========================================================================
    // Form Fields
    // =========================================================================

    pub fn set_base_rate(&self, text: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_base_rate(text);
            Ok(())
        })
    }

    pub fn set_stay_days(&self, text: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_stay_days(text);
            Ok(())
        })
    }

    pub fn set_daily_nursing_rate(&self, text: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_daily_nursing_rate(text);
            Ok(())
        })
    }

    pub fn set_daily_room_rate(&self, text: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_daily_room_rate(text);
            Ok(())
        })
    }

    pub fn set_daily_chief_rate(&self, text: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_daily_chief_rate(text);
            Ok(())
        })
    }

    pub fn set_fixed_supplement(&self, text: String) -> Result<(), EstimatorError> {
        self.with_session(|session| {
            session.set_fixed_supplement(text);
            Ok(())
        })
    }

    // =========================================================================
    // Calculation & Export
    // =========================================================================

    /// Calculate from the current form. Error messages are localized.
    pub fn calculate(&self) -> Result<FfiEstimate, EstimatorError> {
        self.with_session(|session| {
            let locale = session.locale();
            match session.calculate() {
                Ok(result) => Ok(result.clone().into()),
                Err(e) => {
                    let message = export::error_message(&e, locale).to_string();
                    Err(match e {
                        EstimateError::MissingSelection => {
                            EstimatorError::MissingSelection(message)
                        }
                        EstimateError::InvalidRate => EstimatorError::InvalidRate(message),
                    })
                }
            }
        })
    }

    /// Render the last estimate, if any.
    pub fn render(&self) -> Result<Option<FfiRenderedEstimate>, EstimatorError> {
        self.with_session(|session| Ok(session.render_last().map(|r| r.into())))
    }

    /// Export the last estimate as JSON.
    pub fn export_json(&self) -> Result<String, EstimatorError> {
        self.with_session(|session| {
            let export = last_export(session)?;
            Ok(export.to_json()?)
        })
    }

    /// Export the last estimate as CSV.
    pub fn export_csv(&self) -> Result<String, EstimatorError> {
        self.with_session(|session| Ok(last_export(session)?.to_csv()))
    }
}

fn last_export(session: &EstimatorSession) -> Result<EstimateExport, EstimatorError> {
    session
        .render_last()
        .map(EstimateExport::new)
        .ok_or_else(|| EstimatorError::InvalidInput("no estimate has been calculated".into()))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe search hit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCodeMatch {
    pub code: String,
    pub label: String,
    pub weight: f64,
}

/// FFI-safe breakdown line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBreakdownLine {
    pub category: String,
    pub coefficient: f64,
    pub amount: f64,
}

impl From<BreakdownLine> for FfiBreakdownLine {
    fn from(line: BreakdownLine) -> Self {
        Self {
            category: line.category.key().to_string(),
            coefficient: line.coefficient,
            amount: line.amount,
        }
    }
}

/// FFI-safe estimate.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEstimate {
    pub code: String,
    pub weight: f64,
    pub base_rate: f64,
    pub effective_stay_days: u32,
    pub drg_revenue: f64,
    pub nursing_cost: f64,
    pub room_cost: f64,
    pub chief_cost: f64,
    pub supplement_cost: f64,
    pub total: f64,
    pub breakdown: Vec<FfiBreakdownLine>,
}

impl From<EstimateResult> for FfiEstimate {
    fn from(result: EstimateResult) -> Self {
        Self {
            code: result.code,
            weight: result.weight,
            base_rate: result.base_rate,
            effective_stay_days: result.effective_stay_days,
            drg_revenue: result.drg_revenue,
            nursing_cost: result.nursing_cost,
            room_cost: result.room_cost,
            chief_cost: result.chief_cost,
            supplement_cost: result.supplement_cost,
            total: result.total,
            breakdown: result.breakdown.into_iter().map(|l| l.into()).collect(),
        }
    }
}

/// FFI-safe rendered line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRenderedLine {
    pub key: String,
    pub label: String,
    pub amount: f64,
    pub formatted: String,
}

impl From<export::RenderedLine> for FfiRenderedLine {
    fn from(line: export::RenderedLine) -> Self {
        Self {
            key: line.key,
            label: line.label,
            amount: line.amount,
            formatted: line.formatted,
        }
    }
}

/// FFI-safe rendered estimate.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRenderedEstimate {
    pub code: String,
    pub title: String,
    pub locale: String,
    /// "ltr" or "rtl"
    pub direction: String,
    pub stay_days: u32,
    pub lines: Vec<FfiRenderedLine>,
    pub breakdown: Vec<FfiRenderedLine>,
    pub total: FfiRenderedLine,
}

impl From<RenderedEstimate> for FfiRenderedEstimate {
    fn from(estimate: RenderedEstimate) -> Self {
        Self {
            code: estimate.code,
            title: estimate.title,
            locale: estimate.locale.code().to_string(),
            direction: match estimate.direction {
                models::TextDirection::Ltr => "ltr".to_string(),
                models::TextDirection::Rtl => "rtl".to_string(),
            },
            stay_days: estimate.stay_days,
            lines: estimate.lines.into_iter().map(|l| l.into()).collect(),
            breakdown: estimate.breakdown.into_iter().map(|l| l.into()).collect(),
            total: estimate.total.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COSTS: &str = r#"[{"code": "X01", "weight": 2, "breakdown": {"icu": 0.3}}]"#;
    const LABELS: &str = r#"{"X01": {"en": "Spinal fusion", "ru": "Спондилодез"}}"#;

    #[test]
    fn test_ffi_calculate_flow() {
        let estimator = open_estimator_from_json(COSTS.into(), LABELS.into());
        assert!(estimator.is_available());

        let hits = estimator.search_codes("spinal".into()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "Spinal fusion");

        assert!(estimator.select_code("X01".into()).unwrap());
        estimator.set_base_rate("100".into()).unwrap();
        estimator.set_stay_days("1".into()).unwrap();

        let estimate = estimator.calculate().unwrap();
        assert_eq!(estimate.total, 5400.0);
        assert_eq!(estimate.breakdown[0].category, "icu");

        let rendered = estimator.render().unwrap().unwrap();
        assert_eq!(rendered.total.formatted, "€5400.00");
        assert_eq!(rendered.direction, "ltr");

        let csv = estimator.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 8);
    }

    #[test]
    fn test_ffi_localized_errors() {
        let estimator = open_estimator_from_json(COSTS.into(), LABELS.into());
        estimator.set_locale("ru".into()).unwrap();

        match estimator.calculate() {
            Err(EstimatorError::MissingSelection(message)) => {
                assert_eq!(message, "Не выбран код лечения.")
            }
            other => panic!("expected MissingSelection, got {:?}", other),
        }

        estimator.select_code("X01".into()).unwrap();
        assert!(matches!(estimator.calculate(), Err(EstimatorError::InvalidRate(_))));
        assert!(matches!(estimator.export_json(), Err(EstimatorError::InvalidInput(_))));
    }

    #[test]
    fn test_ffi_unavailable() {
        let estimator = open_estimator_from_json("not json".into(), "{}".into());

        assert!(!estimator.is_available());
        assert!(estimator.unavailable_reason().unwrap().contains("JSON"));
        assert!(matches!(
            estimator.search_codes("x".into()),
            Err(EstimatorError::DataUnavailable(_))
        ));
        assert_eq!(
            estimator.unavailable_message("pl-PL".into()),
            "Dane o kosztach są obecnie niedostępne. Odśwież stronę."
        );
    }
}
