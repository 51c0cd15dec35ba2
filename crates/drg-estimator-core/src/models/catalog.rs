//! Treatment code catalog models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight used when a catalog entry carries no usable weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Fixed set of cost centers a DRG weight can be broken down into.
///
/// Variant order is the display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownCategory {
    Nursing,
    Icu,
    Diagnostics,
    Surgery,
    Anesthesia,
    DeliveryRoom,
    CardiacDiagnostics,
    Endoscopy,
    Radiology,
    Lab,
    DiagnosticArea,
    TherapeuticArea,
    Admission,
}

impl BreakdownCategory {
    /// All categories in display order.
    pub const ALL: [BreakdownCategory; 13] = [
        Self::Nursing,
        Self::Icu,
        Self::Diagnostics,
        Self::Surgery,
        Self::Anesthesia,
        Self::DeliveryRoom,
        Self::CardiacDiagnostics,
        Self::Endoscopy,
        Self::Radiology,
        Self::Lab,
        Self::DiagnosticArea,
        Self::TherapeuticArea,
        Self::Admission,
    ];

    /// Canonical snake_case key, as written in the costs table.
    pub fn key(self) -> &'static str {
        match self {
            Self::Nursing => "nursing",
            Self::Icu => "icu",
            Self::Diagnostics => "diagnostics",
            Self::Surgery => "surgery",
            Self::Anesthesia => "anesthesia",
            Self::DeliveryRoom => "delivery_room",
            Self::CardiacDiagnostics => "cardiac_diagnostics",
            Self::Endoscopy => "endoscopy",
            Self::Radiology => "radiology",
            Self::Lab => "lab",
            Self::DiagnosticArea => "diagnostic_area",
            Self::TherapeuticArea => "therapeutic_area",
            Self::Admission => "admission",
        }
    }

    /// Parse a category key from the costs table.
    ///
    /// Case-insensitive; `-` and spaces are treated as `_`, so
    /// `"Delivery-Room"` and `"delivery room"` both map to [`Self::DeliveryRoom`].
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|category| category.key() == normalized)
    }
}

impl fmt::Display for BreakdownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single DRG treatment code in the reference catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentCode {
    /// DRG code - unique identifier
    pub code: String,
    /// Relative-value factor applied to the base rate
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Per-category coefficients, display only
    #[serde(default)]
    pub breakdown: BTreeMap<BreakdownCategory, f64>,
}

impl TreatmentCode {
    /// Create a treatment code with no breakdown.
    pub fn new(code: impl Into<String>, weight: f64) -> Self {
        Self {
            code: code.into(),
            weight,
            breakdown: BTreeMap::new(),
        }
    }

    /// Add a breakdown coefficient.
    pub fn with_category(mut self, category: BreakdownCategory, coefficient: f64) -> Self {
        self.breakdown.insert(category, coefficient);
        self
    }

    /// Weight used for revenue, falling back to [`DEFAULT_WEIGHT`].
    pub fn effective_weight(&self) -> f64 {
        usable_weight(self.weight).unwrap_or(DEFAULT_WEIGHT)
    }
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Returns the weight if it can scale a base rate (finite and non-zero).
pub fn usable_weight(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw != 0.0).then_some(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_parsing() {
        assert_eq!(BreakdownCategory::from_key("icu"), Some(BreakdownCategory::Icu));
        assert_eq!(BreakdownCategory::from_key("ICU"), Some(BreakdownCategory::Icu));
        assert_eq!(
            BreakdownCategory::from_key("delivery-room"),
            Some(BreakdownCategory::DeliveryRoom)
        );
        assert_eq!(
            BreakdownCategory::from_key(" Cardiac Diagnostics "),
            Some(BreakdownCategory::CardiacDiagnostics)
        );
        assert_eq!(BreakdownCategory::from_key("pharmacy"), None);
    }

    #[test]
    fn test_every_key_round_trips() {
        for category in BreakdownCategory::ALL {
            assert_eq!(BreakdownCategory::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn test_breakdown_iterates_in_display_order() {
        let code = TreatmentCode::new("X01", 2.0)
            .with_category(BreakdownCategory::Admission, 0.1)
            .with_category(BreakdownCategory::Nursing, 0.3)
            .with_category(BreakdownCategory::Surgery, 0.5);

        let order: Vec<_> = code.breakdown.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                BreakdownCategory::Nursing,
                BreakdownCategory::Surgery,
                BreakdownCategory::Admission
            ]
        );
    }

    #[test]
    fn test_effective_weight_defaults() {
        assert_eq!(TreatmentCode::new("A", 2.5).effective_weight(), 2.5);
        assert_eq!(TreatmentCode::new("A", 0.0).effective_weight(), DEFAULT_WEIGHT);
        assert_eq!(TreatmentCode::new("A", f64::NAN).effective_weight(), DEFAULT_WEIGHT);
        assert_eq!(
            TreatmentCode::new("A", f64::INFINITY).effective_weight(),
            DEFAULT_WEIGHT
        );
    }

    #[test]
    fn test_breakdown_serializes_with_snake_case_keys() {
        let code = TreatmentCode::new("X01", 1.0).with_category(BreakdownCategory::DeliveryRoom, 0.2);
        let json = serde_json::to_string(&code).unwrap();
        assert!(json.contains("\"delivery_room\":0.2"));
    }

    #[test]
    fn test_deserialize_without_weight() {
        let code: TreatmentCode = serde_json::from_str(r#"{"code": "X01"}"#).unwrap();
        assert_eq!(code.weight, DEFAULT_WEIGHT);
        assert!(code.breakdown.is_empty());
    }
}
